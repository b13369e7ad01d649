//! Color channel validation.
//!
//! A `color` element carries up to four channel attributes, each a float
//! in `[0.0, 1.0]` inclusive. Out-of-range values are errors, never
//! clamped.

use crate::numeric;
use thiserror::Error;

/// Channel attribute names, in the order they are checked.
pub const CHANNELS: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Failure to interpret a channel attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("is not a floating point number")]
    NotAFloat,

    #[error("outside valid range 0.0-1.0")]
    OutOfRange,
}

/// Parse and range-check a single channel value.
///
/// Returns `Ok(None)` for deferred placeholder values.
pub fn channel(value: &str) -> Result<Option<f64>, ColorError> {
    let parsed = numeric::float(value).map_err(|_| ColorError::NotAFloat)?;
    match parsed {
        Some(level) if !(0.0..=1.0).contains(&level) => Err(ColorError::OutOfRange),
        other => Ok(other),
    }
}
