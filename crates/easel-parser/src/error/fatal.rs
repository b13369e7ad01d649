//! Fatal well-formedness failures.

use std::fmt;

use crate::error::Diagnostic;

/// A fatal error from the underlying XML parser.
///
/// Unlike accumulated schema diagnostics, a fatal error aborts the pass
/// immediately and is reported as the sole finding: once the token stream
/// is broken there is no reliable event sequence to keep validating.
#[derive(Debug)]
pub struct FatalError {
    diagnostic: Diagnostic,
}

impl FatalError {
    /// Wrap a diagnostic as a fatal error.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    /// The underlying diagnostic.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consume the error, yielding the diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal: {}", self.diagnostic.message())
    }
}

impl std::error::Error for FatalError {}
