//! Number formatting for the calculator display.
//!
//! Two independent policies live here:
//! - [`round_for_display`] shapes a fresh result before it becomes the new
//!   operand (12 significant digits, exponential outside the 1e-12..1e12 band).
//! - [`present`] shortens an over-long display string at render time without
//!   touching the stored operand.

use super::operand::Operand;

/// Maximum number of typed digits, and the render width of the display.
pub const MAX_DIGITS: usize = 15;

/// Significant digits kept in a result after `=`.
pub const RESULT_PRECISION: usize = 12;

/// Text rendered while the engine is latched in error.
pub const ERROR_TEXT: &str = "Error";

const EXPONENTIAL_ABOVE: f64 = 1e12;
const EXPONENTIAL_BELOW: f64 = 1e-12;

/// Convert a number to its shortest round-trip string.
///
/// Uses plain notation between 1e-6 and 1e21 and exponential notation with an
/// explicitly signed exponent (`1e+21`, `1.5e-7`) outside that range. Negative
/// zero is written as `0`.
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        signed_exponent(&format!("{:e}", value))
    } else {
        format!("{}", value)
    }
}

/// Round a number to `digits` significant decimal digits.
pub fn round_to_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = digits.max(1);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Normalized exponential form with at most `digits` significant digits.
///
/// Trailing zeros of the mantissa are dropped: `1.5e+13`, `-2e-14`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    let formatted = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));

    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };

    signed_exponent(&format!("{}e{}", mantissa, exponent))
}

/// Shape a finite result for storage as the next operand.
pub fn round_for_display(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > EXPONENTIAL_ABOVE || (value != 0.0 && magnitude < EXPONENTIAL_BELOW) {
        to_exponential(value, RESULT_PRECISION)
    } else {
        number_to_string(round_to_significant(value, RESULT_PRECISION))
    }
}

/// Render-time view of an operand.
///
/// Text up to [`MAX_DIGITS`] characters is shown as-is. Longer text is
/// rounded to [`MAX_DIGITS`] significant digits; an [`Operand`] always holds
/// a finite number, so this cannot fail.
pub fn present(operand: &Operand) -> String {
    let text = operand.as_str();
    if text.chars().count() <= MAX_DIGITS {
        return text.to_string();
    }

    number_to_string(round_to_significant(operand.value(), MAX_DIGITS))
}

/// Rewrite `1e21` as `1e+21`; negative exponents are left alone.
fn signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted.to_string(),
    }
}
