//! Labeled source locations for diagnostic messages.

use easel_core::location::Location;

/// A labeled location in the source document.
///
/// Labels attach messages to specific positions, helping users understand
/// where problems occurred and why.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the main location of an error or warning.
///   There should typically be one primary label per diagnostic.
/// - **Secondary labels** provide additional context, such as
///   "first defined here" or "first referenced here".
#[derive(Debug, Clone)]
pub struct Label {
    location: Location,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the location this label applies to.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
