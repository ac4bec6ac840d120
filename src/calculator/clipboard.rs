//! Clipboard functionality for copying calculator readouts.

use arboard::Clipboard;
use thiserror::Error;
use tracing::debug;

use super::readout::Readout;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
}

/// Copy the readout to the system clipboard.
///
/// Numbers are copied unshortened; an error readout copies its message so the
/// user can still paste what they saw. Returns the copied text.
pub fn copy_readout(readout: &Readout) -> Result<String, ClipboardError> {
    let text = readout.text_for_clipboard().to_string();

    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text.clone())
        .map_err(|e| ClipboardError::Write(e.to_string()))?;

    debug!("copied {:?} to clipboard", text);
    Ok(text)
}
