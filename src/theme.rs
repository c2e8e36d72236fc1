// ABOUTME: Theme resolution for the slide renderer
// ABOUTME: Maps the deck's theme setting (`auto` or a JSON style file) onto a color palette

use log::{debug, warn};
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Theme value meaning "use the built-in palette".
pub const AUTO_THEME: &str = "auto";

/// Colors used when rendering slide markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub heading: Color,
    pub emphasis: Color,
    pub code: Color,
    pub bullet: Color,
    pub quote: Color,
    pub link: Color,
    pub rule: Color,
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::Reset,
            heading: Color::Rgb(0x7C, 0x3A, 0xED),
            emphasis: Color::Rgb(0xF4, 0x72, 0xB6),
            code: Color::Rgb(0x94, 0xA3, 0xB8),
            bullet: Color::Rgb(0x38, 0xBD, 0xF8),
            quote: Color::DarkGray,
            link: Color::Rgb(0x60, 0xA5, 0xFA),
            rule: Color::DarkGray,
            accent: Color::Rgb(0x1E, 0x3A, 0x8A),
        }
    }
}

/// A resolved theme. Invalid themes are kept so the renderer can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Auto,
    Custom { source: PathBuf, palette: Palette },
    Invalid(String),
}

impl Theme {
    pub fn palette(&self) -> Option<Palette> {
        match self {
            Theme::Auto => Some(Palette::default()),
            Theme::Custom { palette, .. } => Some(*palette),
            Theme::Invalid(_) => None,
        }
    }
}

/// On-disk style definition. Every key is optional and falls back to the default palette.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleFile {
    text: Option<String>,
    heading: Option<String>,
    emphasis: Option<String>,
    code: Option<String>,
    bullet: Option<String>,
    quote: Option<String>,
    link: Option<String>,
    rule: Option<String>,
    accent: Option<String>,
}

impl StyleFile {
    fn into_palette(self) -> std::result::Result<Palette, String> {
        let defaults = Palette::default();
        Ok(Palette {
            text: parse_color("text", self.text, defaults.text)?,
            heading: parse_color("heading", self.heading, defaults.heading)?,
            emphasis: parse_color("emphasis", self.emphasis, defaults.emphasis)?,
            code: parse_color("code", self.code, defaults.code)?,
            bullet: parse_color("bullet", self.bullet, defaults.bullet)?,
            quote: parse_color("quote", self.quote, defaults.quote)?,
            link: parse_color("link", self.link, defaults.link)?,
            rule: parse_color("rule", self.rule, defaults.rule)?,
            accent: parse_color("accent", self.accent, defaults.accent)?,
        })
    }
}

fn parse_color(key: &str, value: Option<String>, fallback: Color) -> std::result::Result<Color, String> {
    match value {
        None => Ok(fallback),
        Some(raw) => Color::from_str(raw.trim())
            .map_err(|_| format!("invalid color for '{}': {}", key, raw)),
    }
}

/// Directories searched, in order, for a theme file named by a relative path.
pub fn theme_search_path(deck_dir: &Path) -> Vec<PathBuf> {
    let mut search = vec![PathBuf::new(), deck_dir.to_path_buf()];
    if let Some(config_dir) = dirs::config_dir() {
        search.push(config_dir.join("slidetty").join("themes"));
    }
    search
}

/// Resolve a theme setting against the search path.
///
/// Never fails: problems are carried in [`Theme::Invalid`] and reported when rendering.
pub fn resolve_theme(value: &str, deck_dir: &Path) -> Theme {
    let value = value.trim();
    if value.is_empty() || value == AUTO_THEME {
        return Theme::Auto;
    }

    let requested = Path::new(value);
    let candidate = if requested.is_absolute() {
        Some(requested.to_path_buf()).filter(|p| p.is_file())
    } else {
        theme_search_path(deck_dir)
            .into_iter()
            .map(|dir| dir.join(requested))
            .find(|p| p.is_file())
    };

    let Some(path) = candidate else {
        warn!("Theme not found on search path: {}", value);
        return Theme::Invalid(format!("theme not found: {}", value));
    };

    debug!("Loading theme from {:?}", path);
    match load_style_file(&path) {
        Ok(palette) => Theme::Custom {
            source: path,
            palette,
        },
        Err(message) => {
            warn!("Invalid theme {:?}: {}", path, message);
            Theme::Invalid(message)
        }
    }
}

fn load_style_file(path: &Path) -> std::result::Result<Palette, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read theme {}: {}", path.display(), e))?;
    let style: StyleFile = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse theme {}: {}", path.display(), e))?;
    style.into_palette()
}
