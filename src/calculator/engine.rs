//! The chain calculator state machine.
//!
//! Each binary operator folds the pending operation immediately, so
//! `5 + 3 × 2 =` evaluates left to right to `16`. The whole state is the
//! operand entry, an optional accumulator, an optional pending operator and
//! the "equals was just pressed" flag.

use tracing::debug;

use super::command::Command;
use super::format::{self, ERROR_TEXT};
use super::operand::{Digit, Operand};
use super::operator::{CalcError, Operator, evaluate};
use super::readout::Readout;

/// The operand slot: a number, or the error latch.
#[derive(Clone, Debug, PartialEq)]
enum Entry {
    Operand(Operand),
    Error,
}

/// Coarse state of the engine, for renderers and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Building or holding an operand.
    Entering,
    /// A result from `=` is on the display.
    ResultReady,
    /// Latched until [`Command::Clear`].
    Error,
}

/// A single calculator instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    entry: Entry,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    last_pressed_equals: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            entry: Entry::Operand(Operand::zero()),
            accumulator: None,
            pending: None,
            last_pressed_equals: false,
        }
    }

    /// Apply one command and return the display string.
    pub fn apply(&mut self, command: Command) -> String {
        match command {
            Command::Digit(digit) => self.input_digit(digit),
            Command::DecimalPoint => self.input_point(),
            Command::Operator(op) => self.press_operator(op),
            Command::Equals => self.press_equals(),
            Command::Clear => self.clear(),
            Command::Negate => self.negate(),
            Command::Percent => self.percent(),
            Command::Backspace => self.backspace(),
        }

        debug!(
            "{} -> {:?} acc={:?} pending={:?} equals={}",
            command,
            self.entry,
            self.accumulator,
            self.pending,
            self.last_pressed_equals
        );

        self.display()
    }

    /// Apply commands in order and return the final display string.
    pub fn apply_all<I>(&mut self, commands: I) -> String
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply(command);
        }
        self.display()
    }

    /// Current display string: a number or `"Error"`.
    pub fn display(&self) -> String {
        match &self.entry {
            Entry::Operand(operand) => format::present(operand),
            Entry::Error => ERROR_TEXT.to_string(),
        }
    }

    pub fn readout(&self) -> Readout {
        match &self.entry {
            Entry::Operand(operand) => Readout::Value {
                display: format::present(operand),
                value: operand.value(),
                clipboard: operand.to_string(),
            },
            Entry::Error => Readout::error(),
        }
    }

    /// The pending expression, e.g. `"5 ×"`; empty when nothing is pending.
    pub fn tape(&self) -> String {
        match (&self.entry, self.accumulator, self.pending) {
            (Entry::Operand(_), Some(acc), Some(op)) => {
                format!("{} {}", format::number_to_string(acc), op.symbol())
            }
            _ => String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self.entry {
            Entry::Error => Phase::Error,
            Entry::Operand(_) if self.last_pressed_equals => Phase::ResultReady,
            Entry::Operand(_) => Phase::Entering,
        }
    }

    pub fn is_error(&self) -> bool {
        self.entry == Entry::Error
    }

    /// Stored operand text, `None` while in error.
    pub fn current_input(&self) -> Option<&str> {
        match &self.entry {
            Entry::Operand(operand) => Some(operand.as_str()),
            Entry::Error => None,
        }
    }

    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    pub fn last_pressed_equals(&self) -> bool {
        self.last_pressed_equals
    }

    /// The operand to type into, starting a fresh one after `=`.
    fn start_entry(&mut self) -> Option<&mut Operand> {
        if self.is_error() {
            return None;
        }

        if self.last_pressed_equals {
            self.entry = Entry::Operand(Operand::zero());
            self.last_pressed_equals = false;
            self.accumulator = None;
            self.pending = None;
        }

        match &mut self.entry {
            Entry::Operand(operand) => Some(operand),
            Entry::Error => None,
        }
    }

    fn input_digit(&mut self, digit: Digit) {
        if let Some(operand) = self.start_entry()
            && !operand.push_digit(digit)
        {
            debug!("dropped digit {}", digit.as_char());
        }
    }

    fn input_point(&mut self) {
        if let Some(operand) = self.start_entry() {
            operand.push_point();
        }
    }

    fn press_operator(&mut self, op: Operator) {
        let Entry::Operand(operand) = &self.entry else {
            return;
        };
        let input = operand.value();

        match self.accumulator {
            None => self.accumulator = Some(input),
            Some(acc) if !(self.last_pressed_equals && self.pending.is_none()) => {
                let folding = self.pending.unwrap_or(op);
                match evaluate(acc, input, folding) {
                    Ok(value) => self.accumulator = Some(value),
                    Err(err) => {
                        self.latch(err);
                        return;
                    }
                }
            }
            Some(_) => {}
        }

        self.pending = Some(op);
        self.entry = Entry::Operand(Operand::zero());
        self.last_pressed_equals = false;
    }

    fn press_equals(&mut self) {
        let (Entry::Operand(operand), Some(op)) = (&self.entry, self.pending) else {
            self.last_pressed_equals = true;
            return;
        };

        let result = evaluate(self.accumulator.unwrap_or(0.0), operand.value(), op).and_then(
            |value| {
                Operand::parse(&format::round_for_display(value)).ok_or(CalcError::NonFiniteResult)
            },
        );

        match result {
            Ok(operand) => {
                self.entry = Entry::Operand(operand);
                self.accumulator = None;
                self.pending = None;
                self.last_pressed_equals = true;
            }
            Err(err) => self.latch(err),
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn negate(&mut self) {
        if let Entry::Operand(operand) = &mut self.entry
            && !operand.is_zero_literal()
        {
            operand.toggle_sign();
        }
    }

    fn percent(&mut self) {
        let Entry::Operand(operand) = &self.entry else {
            return;
        };

        match Operand::from_value(operand.value() / 100.0) {
            Some(scaled) => self.entry = Entry::Operand(scaled),
            None => self.latch(CalcError::NonFiniteResult),
        }
    }

    fn backspace(&mut self) {
        if self.is_error() {
            return;
        }
        if self.last_pressed_equals {
            self.clear();
            return;
        }
        if let Entry::Operand(operand) = &mut self.entry {
            operand.pop();
        }
    }

    fn latch(&mut self, err: CalcError) {
        debug!("latching error: {}", err);
        self.entry = Entry::Error;
        self.accumulator = None;
        self.pending = None;
    }
}
