// ABOUTME: Application state machine for the slide viewer
// ABOUTME: Consumes events, mutates the deck or editor, and returns side-effect requests

use crate::deck::{Deck, LoadedDeck, Slide};
use crate::editor::EditorSession;
use crate::errors::{Result, SlideError};
use crate::markdown::MarkdownRenderer;
use crate::notification::{Notification, TICK_INTERVAL};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use std::mem;
use std::path::PathBuf;
use std::time::Duration;

/// Hotkeys that copy the Nth command of the current slide.
pub const COPY_HOTKEYS: [char; 10] = ['a', 's', 'd', 'f', 'g', 'z', 'x', 'c', 'v', 'b'];

/// Initial terminal size assumed until the first resize arrives.
const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Something that happened outside the state machine.
#[derive(Debug)]
pub enum AppEvent {
    Resize {
        width: u16,
        height: u16,
    },
    Key(KeyEvent),
    DeckLoaded {
        generation: u64,
        result: Result<LoadedDeck>,
    },
    SlideReloaded {
        index: usize,
        generation: u64,
        revision: u64,
        result: Result<Slide>,
    },
    SlideSaved {
        index: usize,
        path: PathBuf,
        content: String,
        result: Result<()>,
    },
    Copied {
        command: String,
        result: Result<()>,
    },
    Tick,
    FilesChanged(Vec<FileChange>),
}

/// A side effect the hosting runtime must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadDeck {
        generation: u64,
    },
    ReloadSlide {
        index: usize,
        generation: u64,
        revision: u64,
    },
    WriteSlide {
        index: usize,
        path: PathBuf,
        content: String,
    },
    CopyToClipboard {
        command: String,
    },
    ScheduleTick {
        after: Duration,
    },
    Quit,
}

/// A change observed in the deck directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File contents changed in place.
    Modified,
    /// A file appeared, disappeared or was renamed.
    Structural,
}

#[derive(Debug)]
pub enum Mode {
    Viewing,
    Editing(EditorSession),
}

/// The whole viewer state.
#[derive(Debug)]
pub struct App {
    deck: Deck,
    mode: Mode,
    loaded: bool,
    load_error: Option<String>,
    error: Option<String>,
    notification: Option<Notification>,
    tick_armed: bool,
    /// A deck load has been requested and its completion not yet applied.
    load_pending: bool,
    width: u16,
    height: u16,
    renderer: MarkdownRenderer,
    progress: f64,
    generation: u64,
    deferred: Vec<AppEvent>,
    quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let (width, height) = DEFAULT_SIZE;
        Self {
            deck: Deck::default(),
            mode: Mode::Viewing,
            loaded: false,
            load_error: None,
            error: None,
            notification: None,
            tick_armed: false,
            load_pending: false,
            width,
            height,
            renderer: MarkdownRenderer::new(width, &Theme::Auto),
            progress: 0.0,
            generation: 0,
            deferred: Vec::new(),
            quit: false,
        }
    }

    /// Effects to run at startup.
    pub fn init(&mut self) -> Vec<Effect> {
        vec![self.request_load()]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        match &self.mode {
            Mode::Editing(session) => Some(session),
            Mode::Viewing => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle one event to completion.
    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Resize { width, height } => {
                self.resize(width, height);
                Vec::new()
            }
            AppEvent::Tick => self.tick(),
            AppEvent::Copied { command, result } => self.copied(command, result),
            event => match self.mode {
                Mode::Viewing => self.update_viewing(event),
                Mode::Editing(_) => self.update_editing(event),
            },
        }
    }

    fn update_viewing(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Key(key) => self.viewing_key(key),
            AppEvent::DeckLoaded { generation, result } => {
                self.deck_loaded(generation, result);
                Vec::new()
            }
            AppEvent::SlideReloaded {
                index,
                generation,
                revision,
                result,
            } => {
                self.slide_reloaded(index, generation, revision, result);
                Vec::new()
            }
            AppEvent::FilesChanged(changes) => self.files_changed(changes),
            AppEvent::SlideSaved { index, .. } => {
                warn!("Ignoring save completion for slide {} outside the editor", index);
                Vec::new()
            }
            AppEvent::Resize { .. } | AppEvent::Tick | AppEvent::Copied { .. } => Vec::new(),
        }
    }

    fn update_editing(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Key(key) => self.editing_key(key),
            AppEvent::SlideSaved {
                index,
                path,
                content,
                result,
            } => self.slide_saved(index, path, content, result),
            deferred @ (AppEvent::DeckLoaded { .. }
            | AppEvent::SlideReloaded { .. }
            | AppEvent::FilesChanged(_)) => {
                debug!("Deferring {:?} until the editor closes", deferred);
                self.deferred.push(deferred);
                Vec::new()
            }
            AppEvent::Resize { .. } | AppEvent::Tick | AppEvent::Copied { .. } => Vec::new(),
        }
    }

    fn viewing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.request_quit(),
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('e') => {
                self.enter_edit();
                Vec::new()
            }
            KeyCode::Char('r') => self.request_reload().into_iter().collect(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(' ') => {
                self.step(1);
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.step(-1);
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                self.go(1);
                Vec::new()
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                self.go(-1);
                Vec::new()
            }
            KeyCode::Char(c) => match COPY_HOTKEYS.iter().position(|&hotkey| hotkey == c) {
                Some(index) => self.copy_command(index),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn editing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Mode::Editing(session) = &mut self.mode else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => {
                info!("Discarding edits to slide {}", session.index);
                self.error = None;
                self.leave_editor()
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let content = session.buffer();
                match session.path.clone() {
                    Some(path) => {
                        session.saving = true;
                        vec![Effect::WriteSlide {
                            index: session.index,
                            path,
                            content,
                        }]
                    }
                    None => {
                        let index = session.index;
                        self.commit(index, content, None)
                    }
                }
            }
            _ => {
                session.input(key);
                Vec::new()
            }
        }
    }

    fn request_quit(&mut self) -> Vec<Effect> {
        self.quit = true;
        vec![Effect::Quit]
    }

    fn request_load(&mut self) -> Effect {
        self.generation += 1;
        self.load_pending = true;
        Effect::LoadDeck {
            generation: self.generation,
        }
    }

    fn request_reload(&mut self) -> Option<Effect> {
        if self.deck.is_empty() || self.load_error.is_some() {
            return Some(self.request_load());
        }
        let index = self.deck.current_index();
        let slide = self.deck.current()?;
        Some(Effect::ReloadSlide {
            index,
            generation: self.generation,
            revision: slide.revision,
        })
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.renderer = MarkdownRenderer::new(width, &self.deck.metadata().theme);
        if let Mode::Editing(session) = &mut self.mode {
            session.resize(width, height);
        }
    }

    /// Reveal-aware navigation: reveal or hide one unit before changing slides.
    fn step(&mut self, delta: isize) {
        let adjusted = self
            .deck
            .current_mut()
            .map(|slide| slide.adjust_reveal(delta))
            .unwrap_or(false);
        if !adjusted {
            self.go(delta);
        }
    }

    fn go(&mut self, delta: isize) {
        if self.deck.navigate(delta) {
            self.progress = self.deck.progress();
        }
    }

    fn enter_edit(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        let index = self.deck.current_index();
        let Some(slide) = self.deck.get(index) else {
            return;
        };
        info!("Editing slide {}", index);
        let session = EditorSession::new(
            index,
            slide.path.clone(),
            &slide.content,
            self.width,
            self.height,
        );
        self.mode = Mode::Editing(session);
    }

    fn copy_command(&mut self, index: usize) -> Vec<Effect> {
        let Some(command) = self
            .deck
            .current()
            .and_then(|slide| slide.commands.get(index))
            .cloned()
        else {
            return Vec::new();
        };

        let mut effects = vec![Effect::CopyToClipboard {
            command: command.clone(),
        }];
        effects.extend(self.notify(&format!("Copied: {}", command)));
        effects
    }

    /// Show `message` and start the countdown unless one is already running.
    fn notify(&mut self, message: &str) -> Option<Effect> {
        self.notification = Some(Notification::new(message, self.width));
        if self.tick_armed {
            return None;
        }
        self.tick_armed = true;
        Some(Effect::ScheduleTick {
            after: TICK_INTERVAL,
        })
    }

    fn copied(&mut self, command: String, result: Result<()>) -> Vec<Effect> {
        let message = match result {
            Ok(()) => return Vec::new(),
            Err(SlideError::ClipboardUnsupported) => {
                warn!("Clipboard unsupported; could not copy {:?}", command);
                format!("Clipboard unavailable: {}", command)
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                format!("Copy failed: {}", e)
            }
        };
        self.notify(&message).into_iter().collect()
    }

    fn tick(&mut self) -> Vec<Effect> {
        let expired = match self.notification.as_mut() {
            Some(notification) => notification.tick(),
            None => true,
        };
        if expired {
            self.notification = None;
            self.tick_armed = false;
            Vec::new()
        } else {
            vec![Effect::ScheduleTick {
                after: TICK_INTERVAL,
            }]
        }
    }

    fn deck_loaded(&mut self, generation: u64, result: Result<LoadedDeck>) {
        if generation != self.generation {
            warn!(
                "Dropping stale deck load (generation {}, latest {})",
                generation, self.generation
            );
            return;
        }
        match result {
            Ok(loaded) => {
                self.load_pending = false;
                self.deck.replace(loaded);
                self.loaded = true;
                self.load_error = None;
                self.error = None;
                self.renderer = MarkdownRenderer::new(self.width, &self.deck.metadata().theme);
                self.progress = self.deck.progress();
            }
            Err(e) => {
                self.load_pending = false;
                warn!("Deck load failed: {}", e);
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn slide_reloaded(&mut self, index: usize, generation: u64, revision: u64, result: Result<Slide>) {
        let current_revision = self.deck.get(index).map(|slide| slide.revision);
        if generation != self.generation || current_revision != Some(revision) {
            warn!("Dropping stale reload of slide {}", index);
            return;
        }
        let outcome = result.and_then(|slide| self.deck.apply_reload(index, slide));
        match outcome {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!("Reload of slide {} failed: {}", index, e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn files_changed(&mut self, changes: Vec<FileChange>) -> Vec<Effect> {
        let mut indices = Vec::new();
        for change in &changes {
            match (change.kind, self.deck.index_of_path(&change.path)) {
                (ChangeKind::Modified, Some(index)) => {
                    if !indices.contains(&index) {
                        indices.push(index);
                    }
                }
                _ => {
                    debug!("Deck structure changed at {:?}", change.path);
                    return vec![self.request_load()];
                }
            }
        }
        indices
            .into_iter()
            .filter_map(|index| {
                self.deck.get(index).map(|slide| Effect::ReloadSlide {
                    index,
                    generation: self.generation,
                    revision: slide.revision,
                })
            })
            .collect()
    }

    fn slide_saved(
        &mut self,
        index: usize,
        path: PathBuf,
        content: String,
        result: Result<()>,
    ) -> Vec<Effect> {
        if let Mode::Editing(session) = &mut self.mode {
            session.saving = false;
        }
        match result {
            Ok(()) => self.commit(index, content, Some(path)),
            Err(e) => {
                warn!("Saving slide {} failed: {}", index, e);
                self.error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    // Saved content is committed in memory; the file is not re-read.
    fn commit(&mut self, index: usize, content: String, path: Option<PathBuf>) -> Vec<Effect> {
        match self.deck.commit(index, content, path) {
            Ok(()) => {
                info!("Committed edits to slide {}", index);
                self.error = None;
                // Any deck load still outstanding read the files before this save
                let mut effects = Vec::new();
                if self.load_pending {
                    effects.push(self.request_load());
                }
                effects.extend(self.leave_editor());
                effects
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Return to viewing and replay events that arrived during the edit.
    fn leave_editor(&mut self) -> Vec<Effect> {
        self.mode = Mode::Viewing;
        let mut effects = Vec::new();
        for event in mem::take(&mut self.deferred) {
            effects.extend(self.update(event));
        }
        effects
    }
}
