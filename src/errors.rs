// ABOUTME: Error types for the slidetty application
// ABOUTME: Provides structured error handling for deck I/O, rendering and the terminal session

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Failed to read directory {path:?}: {source}")]
    DirectoryReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path:?}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path:?}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid slide index: {0}")]
    InvalidSlideIndex(usize),

    #[error("Clipboard is not supported in this environment")]
    ClipboardUnsupported,

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("{0}")]
    RenderError(String),

    #[error("Terminal error: {0}")]
    TerminalError(#[source] std::io::Error),

    #[error("Target already exists: {0:?}")]
    TargetExists(PathBuf),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

impl SlideError {
    pub fn dir_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlideError::DirectoryReadError {
            path: path.into(),
            source,
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlideError::FileReadError {
            path: path.into(),
            source,
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlideError::FileWriteError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;
