//! Binary operators and the arithmetic behind them.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures of a single arithmetic step.
///
/// Neither variant leaves the engine as an error value: both latch the
/// engine into its `Error` phase.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivideByZero,

    #[error("result is not a finite number")]
    NonFiniteResult,
}

/// A binary operator waiting for its right-hand operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol shown on the calculator keypad.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Map a keypad symbol (or its ASCII stand-in) to an operator.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' | 'X' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Apply `op` to `lhs` and `rhs`.
///
/// Division by an exact zero fails regardless of `lhs`. A non-finite operand
/// yields NaN rather than an error, so the caller decides when to reject it.
pub fn compute(lhs: f64, rhs: f64, op: Operator) -> Result<f64, CalcError> {
    if op == Operator::Divide && rhs == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    if !lhs.is_finite() || !rhs.is_finite() {
        return Ok(f64::NAN);
    }

    Ok(match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => lhs / rhs,
    })
}

/// [`compute`], additionally rejecting infinite and NaN results.
pub fn evaluate(lhs: f64, rhs: f64, op: Operator) -> Result<f64, CalcError> {
    let value = compute(lhs, rhs, op)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFiniteResult)
    }
}
