//! The LayoutError type for wrapping accumulated diagnostics.
//!
//! [`LayoutError`] wraps one or more [`Diagnostic`]s accumulated during a
//! validation pass.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for a failed validation pass.
///
/// Wraps every diagnostic recorded during the pass, in the order they
/// were found.
#[derive(Debug)]
pub struct LayoutError {
    diagnostics: Vec<Diagnostic>,
}

impl LayoutError {
    /// Create a new layout error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error())
            .count()
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for LayoutError {}

impl From<Diagnostic> for LayoutError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for LayoutError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
