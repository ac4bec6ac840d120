//! Splitting typed lines into keypad presses.
//!
//! A line such as `12.5 × 4 =` or `7 Enter AC` is read as a sequence of key
//! tokens. Named keys are matched before single characters so that `Enter`
//! is one press rather than five.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::keymap::command_for_key;
use crate::calculator::Command;

lazy_static! {
    /// Named keys first, then any single non-space character.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"Enter|Escape|Backspace|Delete|F9|AC|\+/-|\S"
    ).unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown key '{key}' at column {column}")]
    UnknownKey { key: String, column: usize },
}

/// One key press found in a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The key text as typed.
    pub text: &'a str,
    /// Byte offset of the key in the line.
    pub offset: usize,
    /// Decoded command, `None` for keys the calculator does not know.
    pub command: Option<Command>,
}

/// Split a line into key tokens.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    KEY_TOKEN
        .find_iter(line)
        .map(|m| Token {
            text: m.as_str(),
            offset: m.start(),
            command: command_for_key(m.as_str()),
        })
        .collect()
}

/// Decode every key in `line`, failing on the first unknown one.
pub fn parse_commands(line: &str) -> Result<Vec<Command>, InputError> {
    tokenize(line)
        .into_iter()
        .map(|token| {
            token.command.ok_or_else(|| InputError::UnknownKey {
                key: token.text.to_string(),
                column: line[..token.offset].chars().count() + 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Calculator, Operator};

    #[test]
    fn test_tokenize_splits_characters() {
        let texts: Vec<&str> = tokenize("12+3=").iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["1", "2", "+", "3", "="]);
    }

    #[test]
    fn test_tokenize_named_keys() {
        let texts: Vec<&str> = tokenize("7 Enter AC +/- Backspace")
            .iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["7", "Enter", "AC", "+/-", "Backspace"]);
    }

    #[test]
    fn test_tokenize_unicode_glyphs() {
        let tokens = tokenize("6×7÷2");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].command, Some(Command::Operator(Operator::Multiply)));
        assert_eq!(tokens[3].command, Some(Command::Operator(Operator::Divide)));
        assert_eq!(tokens[2].offset, "6×".len());
    }

    #[test]
    fn test_parse_commands_drives_calculator() {
        let mut calc = Calculator::new();
        let commands = parse_commands("5 + 3 × 2 =").unwrap();
        assert_eq!(calc.apply_all(commands), "16");
    }

    #[test]
    fn test_parse_commands_reports_unknown_key() {
        let err = parse_commands("2 + q").unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownKey {
                key: "q".to_string(),
                column: 5
            }
        );
        assert_eq!(err.to_string(), "Unknown key 'q' at column 5");
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("   ").is_empty());
        assert_eq!(parse_commands(""), Ok(vec![]));
    }
}
