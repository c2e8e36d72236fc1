// ABOUTME: Library module for the slidetty program.
// ABOUTME: Contains the reveal engine, deck store, state machine and terminal front end.

// Reexport modules
pub mod app;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod deck;
pub mod editor;
pub mod errors;
pub mod markdown;
pub mod notification;
pub mod reveal;
pub mod runtime;
pub mod scaffold;
pub mod theme;
pub mod tui;
pub mod utils;
pub mod view;
pub mod watch;

// Reexport common types and functions
pub use app::{App, AppEvent, Effect};
pub use clipboard::{ClipboardError, ClipboardProvider, SystemClipboard};
pub use commands::extract_commands;
pub use config::Config;
pub use deck::{Deck, DeckSource, LoadedDeck, Slide, load_deck, reload_slide, save_slide};
pub use errors::{Result, SlideError};
pub use reveal::{RevealConfig, analyze_reveal, apply_reveal};
pub use runtime::EffectRunner;
pub use scaffold::{ScaffoldConfig, scaffold_deck};
pub use watch::{DeckWatcher, WatchConfig};
