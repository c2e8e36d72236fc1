// ABOUTME: Configuration module for the slidetty application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::deck::DeckSource;
use crate::watch::WatchConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_SLIDES_DIR: &str = "slides";
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Global configuration for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub slides_dir: PathBuf,
    pub theme: Option<String>,
    pub watch: bool,
    pub debounce_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slides_dir: PathBuf::from(DEFAULT_SLIDES_DIR),
            theme: None,
            watch: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            log_file: None,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let slides_dir = env::var("SLIDETTY_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SLIDES_DIR));
        let theme = env::var("SLIDETTY_THEME").ok().filter(|s| !s.is_empty());
        let watch = env::var("SLIDETTY_WATCH")
            .ok()
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let debounce_ms = env::var("SLIDETTY_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        let log_file = env::var("SLIDETTY_LOG_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            slides_dir,
            theme,
            watch,
            debounce_ms,
            log_file,
        }
    }

    /// Where the viewer reads its deck from
    pub fn deck_source(&self) -> DeckSource {
        DeckSource {
            dir: self.slides_dir.clone(),
            theme_override: self.theme.clone(),
        }
    }

    /// Get a watch configuration for the deck directory
    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            deck_dir: self.slides_dir.clone(),
            debounce_ms: self.debounce_ms,
        }
    }
}
