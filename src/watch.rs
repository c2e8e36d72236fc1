// ABOUTME: Watch module for monitoring the deck directory
// ABOUTME: Turns debounced filesystem events into deck change notifications for the viewer

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use notify::event::{EventKind, ModifyKind};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};

use crate::app::{ChangeKind, FileChange};
use crate::deck::SLIDE_EXTENSION;
use crate::errors::{Result, SlideError};
use crate::utils;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Deck directory to watch
    pub deck_dir: PathBuf,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            deck_dir: PathBuf::from("slides"),
            debounce_ms: 300,
        }
    }
}

/// A running watch on the deck directory.
pub struct DeckWatcher {
    deck_dir: PathBuf,
    rx: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
}

impl DeckWatcher {
    /// Start watching `config.deck_dir` (non-recursively).
    pub fn start(config: &WatchConfig) -> Result<Self> {
        utils::validate_directory_exists(&config.deck_dir)?;

        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
            .map_err(|e| SlideError::WatchError(format!("Failed to create file watcher: {}", e)))?;

        debouncer
            .watcher()
            .watch(&config.deck_dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                SlideError::WatchError(format!(
                    "Failed to start watching directory {:?}: {}",
                    config.deck_dir, e
                ))
            })?;

        info!("Watching for changes in {:?}", config.deck_dir);
        Ok(Self {
            deck_dir: config.deck_dir.clone(),
            rx,
            _debouncer: debouncer,
        })
    }

    /// Drain pending events without blocking.
    pub fn poll(&self) -> Vec<FileChange> {
        let mut changes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        let Some(kind) = classify(&event.kind) else {
                            continue;
                        };
                        for path in &event.paths {
                            if let Some(change) = self.relevant_change(path, kind) {
                                debug!("Detected {:?} change in {:?}", change.kind, change.path);
                                if !changes.contains(&change) {
                                    changes.push(change);
                                }
                            }
                        }
                    }
                }
                Ok(Err(errors)) => {
                    for e in errors {
                        error!("Watch error: {:?}", e);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changes
    }

    // Re-root the event path on the configured deck dir so it matches slide paths
    fn relevant_change(&self, path: &Path, kind: ChangeKind) -> Option<FileChange> {
        let is_markdown = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SLIDE_EXTENSION))
            .unwrap_or(false);
        if !is_markdown {
            return None;
        }
        let name = path.file_name()?;
        let is_metadata = name.to_string_lossy().starts_with('_');
        Some(FileChange {
            path: self.deck_dir.join(name),
            kind: if is_metadata {
                ChangeKind::Structural
            } else {
                kind
            },
        })
    }
}

fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Access(_) => None,
        EventKind::Create(_) | EventKind::Remove(_) => Some(ChangeKind::Structural),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Structural),
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => Some(ChangeKind::Modified),
    }
}
