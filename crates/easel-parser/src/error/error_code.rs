//! Error codes for the layout diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document structure errors
//! - `E1xx` - Attribute value errors
//! - `E2xx` - Grammar errors
//! - `E3xx` - Reference resolution errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document structure errors (E0xx)
    // =========================================================================
    /// Unexpected root element.
    ///
    /// The document's root element is not `mamelayout`.
    E001,

    /// Unexpected element.
    ///
    /// An element was encountered that is not part of the grammar at this
    /// position. Its subtree is skipped.
    E002,

    // =========================================================================
    // Attribute value errors (E1xx)
    // =========================================================================
    /// Invalid integer attribute.
    ///
    /// The attribute did not parse as an integer. Integers accept a `$`,
    /// `0x`, or `#` radix prefix.
    E100,

    /// Invalid float attribute.
    E101,

    /// Invalid numeric attribute.
    ///
    /// The attribute parsed as neither an integer nor a float.
    E102,

    /// Negative attribute value.
    ///
    /// The attribute must be non-negative (`lshift`, `rshift`, screen
    /// `index`).
    E103,

    /// Repeat count not positive.
    E104,

    /// Text alignment out of range.
    ///
    /// The `align` attribute must be in the range 0-2.
    E105,

    /// Color channel out of range.
    ///
    /// Channel values must be in the range 0.0-1.0 inclusive.
    E106,

    // =========================================================================
    // Grammar errors (E2xx)
    // =========================================================================
    /// Missing required attribute.
    E200,

    /// Duplicate definition.
    ///
    /// An element, group, or view name was defined more than once.
    /// Generated names (containing a `~identifier~` placeholder) are
    /// exempt.
    E201,

    /// Duplicate bounds element.
    E202,

    /// Duplicate color element.
    E203,

    /// Mixed bounds attribute forms.
    ///
    /// A bounds element used attributes from both the edge form and the
    /// origin/size form.
    E204,

    /// Inverted bounds.
    ///
    /// `left` exceeds `right` or `top` exceeds `bottom`.
    E205,

    /// Negative bounds dimension.
    E206,

    /// Missing bounds anchor.
    ///
    /// A bounds element needs at least `left` or `x`.
    E207,

    /// Invalid tag attribute.
    E208,

    /// Screen has both index and tag.
    E209,

    /// Parameter has both start and value.
    E210,

    /// Parameter increment without start.
    ///
    /// `increment`, `lshift`, or `rshift` appeared on a fixed-form
    /// parameter.
    E211,

    /// Repeat-only parameter attributes outside repeat scope.
    E212,

    /// Parameter redefined.
    ///
    /// A non-generated parameter name was rebound incompatibly in the
    /// same scope.
    E213,

    /// Bounds inside repeat.
    E214,

    /// Input tag without input mask.
    E215,

    // =========================================================================
    // Reference resolution errors (E3xx)
    // =========================================================================
    /// Referenced element not found.
    E300,

    /// Referenced group not found.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E201").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Document structure errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // Attribute value errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            // Grammar errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
            ErrorCode::E209 => "E209",
            ErrorCode::E210 => "E210",
            ErrorCode::E211 => "E211",
            ErrorCode::E212 => "E212",
            ErrorCode::E213 => "E213",
            ErrorCode::E214 => "E214",
            ErrorCode::E215 => "E215",
            // Reference resolution errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Document structure errors
            ErrorCode::E001 => "unexpected root element",
            ErrorCode::E002 => "unexpected element",
            // Attribute value errors
            ErrorCode::E100 => "invalid integer attribute",
            ErrorCode::E101 => "invalid float attribute",
            ErrorCode::E102 => "invalid numeric attribute",
            ErrorCode::E103 => "negative attribute value",
            ErrorCode::E104 => "repeat count not positive",
            ErrorCode::E105 => "text alignment out of range",
            ErrorCode::E106 => "color channel out of range",
            // Grammar errors
            ErrorCode::E200 => "missing required attribute",
            ErrorCode::E201 => "duplicate definition",
            ErrorCode::E202 => "duplicate bounds element",
            ErrorCode::E203 => "duplicate color element",
            ErrorCode::E204 => "mixed bounds attribute forms",
            ErrorCode::E205 => "inverted bounds",
            ErrorCode::E206 => "negative bounds dimension",
            ErrorCode::E207 => "missing bounds anchor",
            ErrorCode::E208 => "invalid tag attribute",
            ErrorCode::E209 => "screen has both index and tag",
            ErrorCode::E210 => "parameter has both start and value",
            ErrorCode::E211 => "parameter increment without start",
            ErrorCode::E212 => "repeat-only attributes outside repeat",
            ErrorCode::E213 => "parameter redefined",
            ErrorCode::E214 => "bounds inside repeat",
            ErrorCode::E215 => "input tag without input mask",
            // Reference resolution errors
            ErrorCode::E300 => "element not found",
            ErrorCode::E301 => "group not found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
