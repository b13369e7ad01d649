//! Collector for accumulating diagnostics during a validation pass.
//!
//! The [`DiagnosticCollector`] lets the validator report every finding in
//! a single pass instead of failing on the first one. A pass that
//! recorded any diagnostic, error or warning, has failed for artifact
//! generation purposes.

use crate::error::{Diagnostic, LayoutError};

/// A collector for accumulating diagnostics during a validation pass.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.errors += 1;
        } else {
            self.warnings += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error diagnostics recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Number of warning diagnostics recorded so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Finish collection and return a result.
    ///
    /// - If any diagnostic was recorded, returns `Err(LayoutError)` with
    ///   all of them.
    /// - Otherwise returns `Ok(())`.
    pub fn finish(self) -> Result<(), LayoutError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::new(self.diagnostics))
        }
    }
}
