//! Error types for layout compilation.
//!
//! This module provides the main error type [`EaselError`] which wraps
//! the conditions that can occur while compiling a layout document.

use std::io;

use thiserror::Error;

use easel_parser::error::{FatalError, LayoutError};

/// The main error type for layout compilation.
///
/// # Diagnostic Variants
///
/// The `Validation` and `Syntax` variants carry structured diagnostics
/// with source locations, along with the source text they refer to, so
/// reporting layers can render rich snippets.
#[derive(Debug, Error)]
pub enum EaselError {
    /// Reading the source or writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not well-formed XML. Reported as the sole
    /// diagnostic; the pass was aborted.
    #[error("{err}")]
    Syntax { err: FatalError, src: String },

    /// The document violated the layout grammar. Carries every
    /// diagnostic accumulated during the pass.
    #[error("{err}")]
    Validation { err: LayoutError, src: String },
}

impl EaselError {
    /// Create a new `Syntax` error with the associated source text.
    pub fn new_syntax_error(err: FatalError, src: impl Into<String>) -> Self {
        Self::Syntax {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Validation` error with the associated source text.
    pub fn new_validation_error(err: LayoutError, src: impl Into<String>) -> Self {
        Self::Validation {
            err,
            src: src.into(),
        }
    }
}
