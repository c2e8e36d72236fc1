// ABOUTME: Clipboard adapter for copying slide commands
// ABOUTME: Uses an external clipboard tool or OSC 52, and reports unsupported environments separately

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info};
use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::errors::SlideError;

const ENV_CLIPBOARD: &str = "SLIDETTY_CLIPBOARD";

#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard mechanism exists here (headless session, no tools).
    #[error("clipboard not available")]
    Unsupported,

    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),

    #[error("clipboard command failed: {0}")]
    CommandFailed(String),
}

impl From<ClipboardError> for SlideError {
    fn from(err: ClipboardError) -> Self {
        match err {
            ClipboardError::Unsupported => SlideError::ClipboardUnsupported,
            other => SlideError::ClipboardError(other.to_string()),
        }
    }
}

/// Anything that can place text on a clipboard.
pub trait ClipboardProvider {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// External clipboard programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    Pbcopy,
    WlCopy,
    Xclip,
    Xsel,
    Clip,
}

impl ExternalTool {
    fn program(self) -> &'static str {
        match self {
            ExternalTool::Pbcopy => "pbcopy",
            ExternalTool::WlCopy => "wl-copy",
            ExternalTool::Xclip => "xclip",
            ExternalTool::Xsel => "xsel",
            ExternalTool::Clip => "clip",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            ExternalTool::Xclip => &["-selection", "clipboard"],
            ExternalTool::Xsel => &["--clipboard", "--input"],
            _ => &[],
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pbcopy" => Some(ExternalTool::Pbcopy),
            "wl-copy" => Some(ExternalTool::WlCopy),
            "xclip" => Some(ExternalTool::Xclip),
            "xsel" => Some(ExternalTool::Xsel),
            "clip" => Some(ExternalTool::Clip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    External(ExternalTool),
    Osc52,
    Unavailable,
}

/// The clipboard of the machine the viewer runs on.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    backend: ClipboardBackend,
}

impl SystemClipboard {
    /// Pick a backend from `SLIDETTY_CLIPBOARD`, falling back to tool detection.
    pub fn detect() -> Self {
        let backend = match env::var(ENV_CLIPBOARD) {
            Ok(value) => backend_from_override(&value.to_ascii_lowercase()),
            Err(_) => detect_external_tool()
                .map(ClipboardBackend::External)
                .unwrap_or(ClipboardBackend::Unavailable),
        };
        info!("Clipboard backend: {:?}", backend);
        Self { backend }
    }
}

impl ClipboardProvider for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        debug!("Copying {} bytes via {:?}", text.len(), self.backend);
        match self.backend {
            ClipboardBackend::External(tool) => run_with_input(tool, text),
            ClipboardBackend::Osc52 => write_osc52(&mut io::stdout(), text),
            ClipboardBackend::Unavailable => Err(ClipboardError::Unsupported),
        }
    }
}

fn backend_from_override(value: &str) -> ClipboardBackend {
    match value {
        "osc52" => ClipboardBackend::Osc52,
        "none" => ClipboardBackend::Unavailable,
        other => ExternalTool::from_name(other)
            .filter(|tool| command_exists(tool.program()))
            .map(ClipboardBackend::External)
            .unwrap_or(ClipboardBackend::Unavailable),
    }
}

fn detect_external_tool() -> Option<ExternalTool> {
    if cfg!(target_os = "macos") && command_exists("pbcopy") {
        return Some(ExternalTool::Pbcopy);
    }
    if cfg!(target_os = "windows") && command_exists("clip") {
        return Some(ExternalTool::Clip);
    }
    if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
        return Some(ExternalTool::WlCopy);
    }
    if env::var_os("DISPLAY").is_some() {
        if command_exists("xclip") {
            return Some(ExternalTool::Xclip);
        }
        if command_exists("xsel") {
            return Some(ExternalTool::Xsel);
        }
    }
    None
}

fn command_exists(command: &str) -> bool {
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}

fn run_with_input(tool: ExternalTool, text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(tool.program())
        .args(tool.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClipboardError::Unsupported,
            _ => ClipboardError::Io(e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with {}",
            tool.program(),
            status
        )))
    }
}

/// Emit an OSC 52 "set clipboard" sequence.
pub fn write_osc52(writer: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    let encoded = STANDARD.encode(text.as_bytes());
    write!(writer, "\x1b]52;c;{}\x07", encoded)?;
    writer.flush()?;
    Ok(())
}
