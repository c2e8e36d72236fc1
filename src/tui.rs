// ABOUTME: Terminal runtime for the interactive viewer
// ABOUTME: Owns the terminal session, event queue and timers, and drives the state machine

use crate::app::{App, AppEvent, Effect};
use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::errors::{Result, SlideError};
use crate::runtime::EffectRunner;
use crate::view;
use crate::watch::DeckWatcher;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest wait for terminal input before checking timers and the watcher again.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Run the full-screen viewer until the user quits.
pub fn run(config: &Config) -> Result<()> {
    let watcher = if config.watch {
        match DeckWatcher::start(&config.watch_config()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("File watching disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut terminal = ratatui::try_init().map_err(SlideError::TerminalError)?;
    info!("Terminal session started");
    let result = event_loop(&mut terminal, config, watcher);
    ratatui::restore();
    info!("Terminal session ended");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    config: &Config,
    watcher: Option<DeckWatcher>,
) -> Result<()> {
    let mut app = App::new();
    let mut runner = EffectRunner::new(config.deck_source(), SystemClipboard::detect());
    let mut events: VecDeque<AppEvent> = VecDeque::new();
    let mut effects: VecDeque<Effect> = app.init().into();
    let mut timers: Vec<Instant> = Vec::new();

    let size = terminal.size().map_err(SlideError::TerminalError)?;
    events.push_back(AppEvent::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        // Settle: run every requested effect and feed completions back in order
        loop {
            if let Some(effect) = effects.pop_front() {
                match effect {
                    Effect::Quit => return Ok(()),
                    Effect::ScheduleTick { after } => timers.push(Instant::now() + after),
                    other => {
                        if let Some(completion) = runner.perform(other) {
                            events.push_back(completion);
                        }
                    }
                }
                continue;
            }
            match events.pop_front() {
                Some(event) => effects.extend(app.update(event)),
                None => break,
            }
        }

        terminal
            .draw(|frame| view::draw(frame, &app, &config.slides_dir))
            .map_err(SlideError::TerminalError)?;

        let now = Instant::now();
        let timeout = timers
            .iter()
            .min()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout).map_err(SlideError::TerminalError)? {
            match event::read().map_err(SlideError::TerminalError)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events.push_back(AppEvent::Key(key));
                }
                Event::Resize(width, height) => {
                    debug!("Resized to {}x{}", width, height);
                    events.push_back(AppEvent::Resize { width, height });
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let due = timers.iter().filter(|deadline| **deadline <= now).count();
        timers.retain(|deadline| *deadline > now);
        events.extend((0..due).map(|_| AppEvent::Tick));

        if let Some(watcher) = &watcher {
            let changes = watcher.poll();
            if !changes.is_empty() {
                events.push_back(AppEvent::FilesChanged(changes));
            }
        }
    }
}
