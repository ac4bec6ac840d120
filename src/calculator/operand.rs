//! The operand buffer: the number currently being typed or shown.

use std::fmt;

use super::format::{MAX_DIGITS, number_to_string};

/// A single decimal digit `0`-`9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    pub fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

/// Text of the operand, always a finite number with at most one decimal point.
///
/// The digit bound of [`MAX_DIGITS`] applies to typing: [`Operand::push_digit`]
/// refuses to grow past it. Results stored after an evaluation may carry more
/// characters (exponential form, long fractions) and are shortened at render
/// time instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    text: String,
}

impl Default for Operand {
    fn default() -> Self {
        Self::zero()
    }
}

impl Operand {
    pub fn zero() -> Self {
        Self {
            text: "0".to_string(),
        }
    }

    /// Accept `text` if it holds a finite number with at most one point.
    pub fn parse(text: &str) -> Option<Self> {
        is_valid(text).then(|| Self {
            text: text.to_string(),
        })
    }

    /// Stringify a value; `None` when it is not finite.
    pub fn from_value(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::parse(&number_to_string(value))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        // Every constructor and mutator keeps the text parseable.
        self.text.parse().unwrap_or(0.0)
    }

    /// True for the untouched `"0"` entry.
    pub fn is_zero_literal(&self) -> bool {
        self.text == "0"
    }

    pub fn has_point(&self) -> bool {
        self.text.contains('.')
    }

    /// Number of digits, sign and point excluded.
    pub fn digit_count(&self) -> usize {
        self.text.chars().filter(char::is_ascii_digit).count()
    }

    /// Append a digit. A lone zero is replaced rather than extended.
    ///
    /// Returns `false` when the press is dropped because the digit bound is
    /// reached or the result would not be a finite number.
    pub fn push_digit(&mut self, digit: Digit) -> bool {
        match self.text.as_str() {
            "0" => {
                self.text = digit.as_char().to_string();
                return true;
            }
            "-0" => {
                self.text = format!("-{}", digit.as_char());
                return true;
            }
            _ => {}
        }

        if self.digit_count() >= MAX_DIGITS {
            return false;
        }

        let mut candidate = self.text.clone();
        candidate.push(digit.as_char());
        self.replace_if_valid(candidate)
    }

    /// Append a decimal point unless one is already present.
    pub fn push_point(&mut self) -> bool {
        if self.has_point() {
            return false;
        }

        let mut candidate = self.text.clone();
        candidate.push('.');
        self.replace_if_valid(candidate)
    }

    /// Toggle the leading minus sign.
    pub fn toggle_sign(&mut self) {
        match self.text.strip_prefix('-') {
            Some(rest) => self.text = rest.to_string(),
            None => self.text.insert(0, '-'),
        }
    }

    /// Remove the last character.
    ///
    /// Characters that would leave a dangling fragment (`-`, `1e+`) go with
    /// it; an emptied buffer becomes `"0"`.
    pub fn pop(&mut self) {
        let mut text = self.text.clone();
        text.pop();
        while !text.is_empty() && !is_valid(&text) {
            text.pop();
        }

        self.text = if text.is_empty() {
            "0".to_string()
        } else {
            text
        };
    }

    fn replace_if_valid(&mut self, candidate: String) -> bool {
        if is_valid(&candidate) {
            self.text = candidate;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn is_valid(text: &str) -> bool {
    if text.matches('.').count() > 1 || !text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    text.parse::<f64>().is_ok_and(f64::is_finite)
}
