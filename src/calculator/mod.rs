//! Calculator module: the chain calculator engine and its formatting rules.
//!
//! This module provides functionality to:
//! - Apply normalized keypad commands to a calculator state machine
//! - Round results and shorten long displays
//! - Copy the current readout to the clipboard

mod clipboard;
mod command;
mod engine;
pub mod format;
mod operand;
mod operator;
mod readout;

pub use clipboard::{ClipboardError, copy_readout};
pub use command::Command;
pub use engine::{Calculator, Phase};
pub use operand::{Digit, Operand};
pub use operator::{CalcError, Operator, compute, evaluate};
pub use readout::Readout;
