// ABOUTME: Slide editing submode
// ABOUTME: Holds the text buffer being edited and computes the floating edit panel geometry

use crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use std::path::{Path, PathBuf};
use tui_textarea::TextArea;

const MIN_PANEL_WIDTH: u16 = 28;
const MIN_PANEL_HEIGHT: u16 = 10;
const PANEL_HORIZ_PAD: u16 = 4;
const PANEL_VERT_PAD: u16 = 4;

/// Size of the edit panel and of the text area inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub panel_width: u16,
    pub panel_height: u16,
    pub editor_width: u16,
    pub editor_height: u16,
}

impl EditorLayout {
    /// Compute the panel for a terminal of `width` x `height` cells.
    pub fn compute(width: u16, height: u16) -> Self {
        let width = i32::from(width.max(MIN_PANEL_WIDTH + 2));
        let height = i32::from(height.max(MIN_PANEL_HEIGHT + 2));
        let min_w = i32::from(MIN_PANEL_WIDTH);
        let min_h = i32::from(MIN_PANEL_HEIGHT);

        let mut max_panel_width = width - 4;
        if max_panel_width < min_w {
            max_panel_width = width - 2;
            if max_panel_width < min_w {
                max_panel_width = width;
            }
        }
        let target_width = (f64::from(width) * 0.7).round() as i32;
        let panel_width = clamp(target_width, min_w, max_panel_width);

        let mut max_panel_height = height - 12;
        if max_panel_height < min_h {
            max_panel_height = height - 8;
            if max_panel_height < min_h {
                max_panel_height = height - 4;
            }
        }
        let target_height = (f64::from(height) * 0.4).round() as i32;
        let panel_height = clamp(target_height, min_h, max_panel_height);

        let editor_width = clamp(panel_width - i32::from(PANEL_HORIZ_PAD), 12, panel_width - 2);
        let editor_height = clamp(panel_height - i32::from(PANEL_VERT_PAD), 6, panel_height - 2);

        Self {
            panel_width: to_u16(panel_width),
            panel_height: to_u16(panel_height),
            editor_width: to_u16(editor_width),
            editor_height: to_u16(editor_height),
        }
    }
}

// Lower bound wins when the range is inverted
fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// An in-progress edit of one slide.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub index: usize,
    pub path: Option<PathBuf>,
    pub layout: EditorLayout,
    /// Set while a write of the buffer is in flight.
    pub saving: bool,
    textarea: TextArea<'static>,
}

impl EditorSession {
    pub fn new(index: usize, path: Option<PathBuf>, content: &str, width: u16, height: u16) -> Self {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let mut textarea = TextArea::new(lines);
        textarea.set_placeholder_text("Edit slide markdown...");
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        Self {
            index,
            path,
            layout: EditorLayout::compute(width, height),
            saving: false,
            textarea,
        }
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Forward a key press to the text buffer. Returns true if the buffer changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = EditorLayout::compute(width, height);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Label shown under the buffer: the file name, or a note that there is no file.
    pub fn path_label(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unsaved slide".to_string())
    }
}
