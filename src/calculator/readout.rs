//! Snapshot of what the calculator shows.

use serde::Serialize;

use super::format::ERROR_TEXT;

/// What the display renderer receives after each command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Readout {
    /// A number is on the display.
    Value {
        /// Text as rendered (shortened when longer than the display).
        display: String,
        /// Numeric value of the stored operand.
        value: f64,
        /// Stored operand text, unshortened.
        clipboard: String,
    },
    /// The engine is latched in error until cleared.
    Error {
        /// Always [`ERROR_TEXT`].
        message: String,
    },
}

impl Readout {
    pub fn error() -> Self {
        Self::Error {
            message: ERROR_TEXT.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Get the display string (value or error text).
    pub fn display(&self) -> &str {
        match self {
            Self::Value { display, .. } => display,
            Self::Error { message } => message,
        }
    }

    /// Get the clipboard string (only for numbers).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Value { clipboard, .. } => Some(clipboard),
            Self::Error { .. } => None,
        }
    }

    /// Text to copy: the full operand for numbers, the error text otherwise.
    pub fn text_for_clipboard(&self) -> &str {
        self.clipboard().unwrap_or_else(|| self.display())
    }
}
