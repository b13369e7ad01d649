//! Error and diagnostic system for the layout validator.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled source locations for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, which represents a
//! single error or warning message with optional error code, one or more
//! source locations, and help text. Accumulated diagnostics are wrapped in
//! [`LayoutError`] at the end of a validation pass; a well-formedness
//! failure from the underlying XML parser is the distinct [`FatalError`],
//! which aborts the pass immediately instead of accumulating.
//!
//! # Example
//!
//! ```
//! # use easel_parser::error::{Diagnostic, ErrorCode};
//! # use easel_core::location::Location;
//!
//! let here = Location::new(120, 10, 3);
//! let first = Location::new(40, 4, 3);
//!
//! let diag = Diagnostic::error("element `element` has duplicate name `lamp`")
//!     .with_code(ErrorCode::E201)
//!     .with_label(here, "duplicate definition")
//!     .with_secondary_label(first, "first defined here")
//!     .with_help("remove the duplicate or use a different name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod fatal;
mod label;
mod layout_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use fatal::FatalError;
pub use label::Label;
pub use layout_error::LayoutError;
pub use severity::Severity;
