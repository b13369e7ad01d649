//! Numeric attribute parsing with the layout dialect's prefix rules.
//!
//! Integer attributes accept a `$` or `0x`/`0X` prefix for base 16 and a
//! `#` prefix for explicit base 10. The auto-detecting parser treats
//! unprefixed values containing `.`, `e`, or `E` as floats. A value
//! containing a `~identifier~` placeholder is produced by template
//! expansion and cannot be evaluated statically; all parsers defer such
//! values by returning `Ok(None)`.

use thiserror::Error;

/// A parsed numeric attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

/// Failure to interpret attribute text as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("is not an integer")]
    NotAnInteger,

    #[error("is not a floating point number")]
    NotAFloat,

    #[error("is not a number")]
    NotANumber,
}

/// Whether the value contains a `~identifier~` repeat placeholder.
///
/// Placeholder identifiers are ASCII alphanumerics and underscores, at
/// least one character, between two tildes.
pub fn is_placeholder(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            if j > i + 1 && j < bytes.len() && bytes[j] == b'~' {
                return true;
            }
            // The terminating byte may itself open a candidate.
            i = j.max(i + 1);
        } else {
            i += 1;
        }
    }
    false
}

/// Parse an integer attribute value.
///
/// Returns `Ok(None)` for deferred placeholder values.
pub fn integer(value: &str) -> Result<Option<i64>, NumericError> {
    if is_placeholder(value) {
        return Ok(None);
    }
    let (digits, radix, _) = split_radix_prefix(value);
    i64::from_str_radix(digits, radix)
        .map(Some)
        .map_err(|_| NumericError::NotAnInteger)
}

/// Parse a float attribute value.
///
/// Returns `Ok(None)` for deferred placeholder values.
pub fn float(value: &str) -> Result<Option<f64>, NumericError> {
    if is_placeholder(value) {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| NumericError::NotAFloat)
}

/// Parse an attribute value as an integer or float, auto-detecting.
///
/// An explicit radix prefix forces integer interpretation; otherwise a
/// value containing `.`, `e`, or `E` parses as a float and anything else
/// as a decimal integer. Returns `Ok(None)` for deferred placeholders.
pub fn numeric(value: &str) -> Result<Option<Numeric>, NumericError> {
    if is_placeholder(value) {
        return Ok(None);
    }
    let (digits, radix, explicit) = split_radix_prefix(value);
    if !explicit && value.contains(['.', 'e', 'E']) {
        return value
            .parse::<f64>()
            .map(|parsed| Some(Numeric::Float(parsed)))
            .map_err(|_| NumericError::NotANumber);
    }
    i64::from_str_radix(digits, radix)
        .map(|parsed| Some(Numeric::Int(parsed)))
        .map_err(|_| NumericError::NotANumber)
}

/// Split off a radix prefix: `$`/`0x`/`0X` select base 16, `#` selects
/// base 10. The third component reports whether a prefix was present.
fn split_radix_prefix(value: &str) -> (&str, u32, bool) {
    if let Some(rest) = value.strip_prefix('$') {
        (rest, 16, true)
    } else if let Some(rest) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        (rest, 16, true)
    } else if let Some(rest) = value.strip_prefix('#') {
        (rest, 10, true)
    } else {
        (value, 10, false)
    }
}
