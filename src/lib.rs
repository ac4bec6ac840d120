//! A chain calculator for the terminal.
//!
//! The [`calculator`] engine turns keypad commands into a display string
//! using left-to-right chain evaluation. Around it sit an [`input`] adapter
//! for key names and typed lines, a [`ui`] renderer with named themes and a
//! translucent mode, and [`config`] settings persisted across sessions.

pub mod calculator;
pub mod config;
pub mod input;
pub mod logging;
pub mod session;
pub mod ui;
