//! Input adapter: turns key names, button labels and typed lines into
//! calculator commands.

mod keymap;
mod tokens;

pub use keymap::command_for_key;
pub use tokens::{InputError, Token, parse_commands, tokenize};
