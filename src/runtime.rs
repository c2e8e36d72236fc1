// ABOUTME: Effect execution for the slide viewer
// ABOUTME: Performs file and clipboard side effects and turns their outcomes back into events

use crate::app::{AppEvent, Effect};
use crate::clipboard::ClipboardProvider;
use crate::deck::{self, DeckSource};
use crate::errors::SlideError;
use log::debug;

/// Runs the I/O requested by the state machine.
///
/// Timers and quitting belong to the terminal loop; everything else is handled here.
pub struct EffectRunner<C: ClipboardProvider> {
    source: DeckSource,
    clipboard: C,
}

impl<C: ClipboardProvider> EffectRunner<C> {
    pub fn new(source: DeckSource, clipboard: C) -> Self {
        Self { source, clipboard }
    }

    pub fn source(&self) -> &DeckSource {
        &self.source
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Perform `effect` and return the completion event, if it produces one.
    pub fn perform(&mut self, effect: Effect) -> Option<AppEvent> {
        debug!("Performing {:?}", effect);
        match effect {
            Effect::LoadDeck { generation } => Some(AppEvent::DeckLoaded {
                generation,
                result: deck::load_deck(&self.source),
            }),
            Effect::ReloadSlide {
                index,
                generation,
                revision,
            } => Some(AppEvent::SlideReloaded {
                index,
                generation,
                revision,
                result: deck::reload_slide(&self.source, index),
            }),
            Effect::WriteSlide {
                index,
                path,
                content,
            } => {
                let result = deck::save_slide(&path, &content);
                Some(AppEvent::SlideSaved {
                    index,
                    path,
                    content,
                    result,
                })
            }
            Effect::CopyToClipboard { command } => {
                let result = self.clipboard.copy(&command).map_err(SlideError::from);
                Some(AppEvent::Copied { command, result })
            }
            Effect::ScheduleTick { .. } | Effect::Quit => None,
        }
    }
}
