//! Normalized commands accepted by the calculator engine.

use std::fmt;

use super::operand::Digit;
use super::operator::Operator;

/// One keypad press, already decoded by the input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Digit(Digit),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Clear,
    Negate,
    Percent,
    Backspace,
}

impl Command {
    /// Keypad label used in logs and the session help.
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.as_char().to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Negate => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.label())
    }
}
