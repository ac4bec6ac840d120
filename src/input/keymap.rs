//! Key and button label lookup.

use crate::calculator::{Command, Digit, Operator};

/// Map a key name or keypad label to a command.
///
/// Accepts browser-style key names (`Enter`, `Escape`, `Backspace`,
/// `Delete`, `F9`), the keypad glyphs (`×`, `÷`, `−`, `±`, `⌫`) and their
/// ASCII stand-ins.
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "." | "," => Command::DecimalPoint,
        "=" | "Enter" => Command::Equals,
        "Escape" | "Delete" | "AC" | "c" | "C" => Command::Clear,
        "Backspace" | "⌫" => Command::Backspace,
        "%" => Command::Percent,
        "n" | "±" | "+/-" | "F9" => Command::Negate,
        _ => return single_char(key),
    };
    Some(command)
}

fn single_char(key: &str) -> Option<Command> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    Digit::from_char(c)
        .map(Command::Digit)
        .or_else(|| Operator::from_symbol(c).map(Command::Operator))
}
