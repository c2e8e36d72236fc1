// ABOUTME: Deck store for the slidetty application
// ABOUTME: Loads, reloads and saves slide files and keeps per-slide reveal and command state

use crate::commands::extract_commands;
use crate::errors::{Result, SlideError};
use crate::reveal::{self, RevealConfig};
use crate::theme::{self, Theme, AUTO_THEME};
use crate::utils;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of slide files.
pub const SLIDE_EXTENSION: &str = "md";
/// Metadata file holding the deck title.
pub const TITLE_FILE: &str = "_title.md";
/// Metadata file holding the deck author.
pub const AUTHOR_FILE: &str = "_author.md";
/// Metadata file holding the theme setting.
pub const THEME_FILE: &str = "_theme.md";

/// Where a deck comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSource {
    pub dir: PathBuf,
    /// Overrides the deck's `_theme.md` when set.
    pub theme_override: Option<String>,
}

impl DeckSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            theme_override: None,
        }
    }
}

/// One slide with everything derived from its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub content: String,
    pub path: Option<PathBuf>,
    pub reveal: RevealConfig,
    pub commands: Vec<String>,
    /// Number of reveal units currently shown.
    pub cursor: usize,
    /// Bumped whenever content is replaced; tags in-flight reloads.
    pub revision: u64,
}

impl Slide {
    pub fn new(content: impl Into<String>, path: Option<PathBuf>) -> Self {
        let content = content.into();
        let reveal = reveal::analyze_reveal(&content);
        let commands = extract_commands(&content);
        let cursor = reveal.min_visible();
        Self {
            content,
            path,
            reveal,
            commands,
            cursor,
            revision: 0,
        }
    }

    /// Replace content, recompute derived state and keep the cursor when still in bounds.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.reveal = reveal::analyze_reveal(&self.content);
        self.commands = extract_commands(&self.content);
        self.cursor = self.reveal.clamp_cursor(self.cursor);
        self.revision += 1;
    }

    /// Move the reveal cursor by `delta`. Returns false when the clamped value is unchanged.
    pub fn adjust_reveal(&mut self, delta: isize) -> bool {
        let total = self.reveal.total_items();
        if total == 0 {
            return false;
        }
        let current = self.reveal.clamp_cursor(self.cursor);
        let next = self
            .reveal
            .clamp_cursor(current.saturating_add_signed(delta));
        self.cursor = next;
        next != current
    }

    pub fn has_hidden_units(&self) -> bool {
        self.cursor < self.reveal.total_items()
    }

    /// Content as it should be displayed at the current reveal cursor.
    pub fn visible_content(&self) -> String {
        reveal::apply_reveal(&self.content, &self.reveal, self.cursor)
    }
}

/// Deck-level metadata read from the underscore files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub theme: Theme,
}

/// Result of reading a deck directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDeck {
    pub slides: Vec<Slide>,
    pub metadata: DeckMetadata,
}

/// The slides being presented plus the current position.
#[derive(Debug, Default)]
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
    metadata: DeckMetadata,
}

impl Deck {
    pub fn new(loaded: LoadedDeck) -> Self {
        let mut deck = Self::default();
        deck.replace(loaded);
        deck
    }

    /// Replace every slide, clamping the current index into the new deck.
    pub fn replace(&mut self, loaded: LoadedDeck) {
        self.slides = loaded.slides;
        self.metadata = loaded.metadata;
        self.current = self.current.min(self.slides.len().saturating_sub(1));
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn metadata(&self) -> &DeckMetadata {
        &self.metadata
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut Slide> {
        self.slides.get_mut(self.current)
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Move by `delta` slides, clamped to the deck. Returns true when the index changed.
    pub fn navigate(&mut self, delta: isize) -> bool {
        if self.slides.is_empty() {
            return false;
        }
        let last = self.slides.len() - 1;
        let next = self.current.saturating_add_signed(delta).min(last);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Fraction of the deck shown so far, `(index + 1) / count`.
    pub fn progress(&self) -> f64 {
        if self.slides.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.slides.len() as f64
    }

    /// Commit edited content into a slide.
    pub fn commit(&mut self, index: usize, content: String, path: Option<PathBuf>) -> Result<()> {
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(SlideError::InvalidSlideIndex(index))?;
        slide.set_content(content);
        if path.is_some() {
            slide.path = path;
        }
        Ok(())
    }

    /// Merge a freshly read slide, preserving the reveal cursor where the new bounds allow.
    pub fn apply_reload(&mut self, index: usize, fresh: Slide) -> Result<()> {
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(SlideError::InvalidSlideIndex(index))?;
        slide.set_content(fresh.content);
        if fresh.path.is_some() {
            slide.path = fresh.path;
        }
        Ok(())
    }

    /// Index of the slide backed by `path`, if any.
    pub fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.slides
            .iter()
            .position(|slide| slide.path.as_deref() == Some(path))
    }
}

/// List slide files in a deck directory, sorted by file name, excluding `_` files.
pub fn list_slide_files(dir: &Path) -> Result<Vec<PathBuf>> {
    utils::validate_directory_exists(dir)?;

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        SLIDE_EXTENSION
    );
    let entries = glob::glob(&pattern).map_err(|e| {
        SlideError::ValidationError(format!("Invalid slide pattern {}: {}", pattern, e))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            SlideError::dir_read(path, e.into_error())
        })?;
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('_') {
            continue;
        }
        names.push(name.to_string());
    }

    names.sort();
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Read every slide and the metadata files from the deck directory.
pub fn load_deck(source: &DeckSource) -> Result<LoadedDeck> {
    info!("Loading deck from {:?}", source.dir);

    let files = list_slide_files(&source.dir)?;
    let mut slides = Vec::with_capacity(files.len());
    for path in files {
        let content = read_slide(&path)?;
        slides.push(Slide::new(content, Some(path)));
    }

    let theme_value = match &source.theme_override {
        Some(value) => value.clone(),
        None => read_metadata(&source.dir, THEME_FILE).unwrap_or_else(|| AUTO_THEME.to_string()),
    };
    let metadata = DeckMetadata {
        title: read_metadata(&source.dir, TITLE_FILE),
        author: read_metadata(&source.dir, AUTHOR_FILE),
        theme: theme::resolve_theme(&theme_value, &source.dir),
    };

    info!("Loaded {} slides", slides.len());
    Ok(LoadedDeck { slides, metadata })
}

/// Re-list the deck directory and re-read the slide at `index`.
pub fn reload_slide(source: &DeckSource, index: usize) -> Result<Slide> {
    let files = list_slide_files(&source.dir)?;
    let path = files
        .into_iter()
        .nth(index)
        .ok_or(SlideError::InvalidSlideIndex(index))?;
    debug!("Reloading slide {} from {:?}", index, path);
    let content = read_slide(&path)?;
    Ok(Slide::new(content, Some(path)))
}

/// Write slide content to its backing file.
pub fn save_slide(path: &Path, content: &str) -> Result<()> {
    info!("Saving slide to {:?}", path);
    fs::write(path, content).map_err(|e| SlideError::file_write(path, e))
}

fn read_slide(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SlideError::file_read(path, e))
}

// Missing or blank metadata files count as absent
fn read_metadata(dir: &Path, name: &str) -> Option<String> {
    let value = fs::read_to_string(dir.join(name)).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
