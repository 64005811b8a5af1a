//! Type inference for raw Luco lexemes.
//!
//! Luco uses syntactic typing: an unquoted lexeme is classified by its shape
//! alone, with no value sniffing beyond the fixed keyword set. Quoted lexemes
//! never reach this module — the parser commits them as strings verbatim.
//!
//! ## Classification
//!
//! | lexeme                          | result            |
//! |---------------------------------|-------------------|
//! | `null`                          | null              |
//! | `true`, `on`                    | boolean `true`    |
//! | `false`, `off`                  | boolean `false`   |
//! | digits only                     | integer           |
//! | digits with a single `.`        | double            |
//! | anything else                   | string, verbatim  |
//!
//! Signs are not part of the grammar; `-5` is a string.

use crate::scalar::Scalar;

/// Shape of a numeric lexeme, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumberShape {
    Integer,
    Double,
}

/// Classifies an already-dequoted lexeme into a [`Scalar`].
///
/// # Examples
///
/// ```rust
/// use luco::{infer, Scalar};
///
/// assert_eq!(infer("null"), Scalar::Null);
/// assert_eq!(infer("on"), Scalar::Boolean(true));
/// assert_eq!(infer("42"), Scalar::Integer(42));
/// assert_eq!(infer("4.2"), Scalar::Double(4.2));
/// assert_eq!(infer("-5"), Scalar::String("-5".to_string()));
/// ```
#[must_use]
pub fn infer(raw: &str) -> Scalar {
    if raw == "null" {
        return Scalar::Null;
    }
    match number_shape(raw) {
        Some(NumberShape::Integer) => {
            return match raw.parse::<i64>() {
                Ok(i) => Scalar::Integer(i),
                // Digits beyond i64 range; keep the magnitude as a double.
                Err(_) => Scalar::Double(raw.parse::<f64>().unwrap_or(f64::MAX)),
            };
        }
        Some(NumberShape::Double) => {
            if let Ok(d) = raw.parse::<f64>() {
                return Scalar::Double(d);
            }
        }
        None => {}
    }
    match raw {
        "true" | "on" => Scalar::Boolean(true),
        "false" | "off" => Scalar::Boolean(false),
        other => Scalar::String(other.to_string()),
    }
}

/// Scans for the digits-with-at-most-one-dot shape. Empty input and a lone
/// `.` are not numbers.
fn number_shape(raw: &str) -> Option<NumberShape> {
    if raw.is_empty() {
        return None;
    }
    let mut has_decimal = false;
    let mut has_digit = false;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else if c == '.' && !has_decimal {
            has_decimal = true;
        } else {
            return None;
        }
    }
    if !has_digit {
        return None;
    }
    Some(if has_decimal {
        NumberShape::Double
    } else {
        NumberShape::Integer
    })
}
