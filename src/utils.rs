// ABOUTME: Utility functions for the slidetty application
// ABOUTME: Path validation helpers and text truncation shared by the deck, scaffolder and view

use crate::errors::{Result, SlideError};
use std::io;
use std::path::Path;

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| SlideError::dir_read(path, e))?;
    if !metadata.is_dir() {
        return Err(SlideError::dir_read(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }
    Ok(())
}

/// Fail when something already exists at `path`
pub fn ensure_path_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(SlideError::TargetExists(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| SlideError::file_write(path, e))?;
    } else if !path.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Truncate `text` to at most `max` characters, ending in `...` when cut
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return ".".repeat(max);
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
