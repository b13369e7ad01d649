//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Any recorded diagnostic, error or warning, fails the pass for artifact
/// generation purposes; the distinction exists for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A schema violation that must be fixed.
    Error,

    /// An advisory finding. The grammar currently only emits errors, but
    /// the channel is part of the reporting contract: a warning still
    /// prevents the artifact from being produced.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
