//! Device tag syntax checks.
//!
//! Tags address devices by path. A tag must be non-empty, must not climb
//! to a parent device (`^`), must not end with the path separator (`:`),
//! and must not contain a doubled separator (`::`). Screen tags are
//! additionally restricted to a conservative character set.

use thiserror::Error;

/// A violation of tag syntax. A single tag can violate several rules;
/// all violations are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagIssue {
    #[error("is empty")]
    Empty,

    #[error("contains parent device reference")]
    ParentDeviceRef,

    #[error("ends with separator")]
    TrailingSeparator,

    #[error("contains double separator")]
    DoubledSeparator,
}

/// Check general tag syntax.
pub fn check(tag: &str) -> Vec<TagIssue> {
    if tag.is_empty() {
        return vec![TagIssue::Empty];
    }
    let mut issues = Vec::new();
    if tag.contains('^') {
        issues.push(TagIssue::ParentDeviceRef);
    }
    if tag.ends_with(':') {
        issues.push(TagIssue::TrailingSeparator);
    }
    if tag.contains("::") {
        issues.push(TagIssue::DoubledSeparator);
    }
    issues
}

/// Whether a screen tag contains characters outside `[a-z0-9_.:^$]`.
pub fn has_invalid_chars(tag: &str) -> bool {
    tag.bytes().any(|byte| {
        !(byte.is_ascii_lowercase()
            || byte.is_ascii_digit()
            || matches!(byte, b'_' | b'.' | b':' | b'^' | b'$'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tags() {
        assert!(check("screen").is_empty());
        assert!(check("maincpu:ram").is_empty());
    }

    #[test]
    fn test_empty_tag_is_sole_issue() {
        assert_eq!(check(""), vec![TagIssue::Empty]);
    }

    #[test]
    fn test_parent_reference() {
        assert_eq!(check("^screen"), vec![TagIssue::ParentDeviceRef]);
    }

    #[test]
    fn test_trailing_and_doubled_separator() {
        assert_eq!(check("screen:"), vec![TagIssue::TrailingSeparator]);
        assert_eq!(check("a::b"), vec![TagIssue::DoubledSeparator]);
        assert_eq!(
            check("a::"),
            vec![TagIssue::TrailingSeparator, TagIssue::DoubledSeparator]
        );
    }

    #[test]
    fn test_screen_tag_charset() {
        assert!(!has_invalid_chars("screen.0:tag"));
        assert!(has_invalid_chars("Screen"));
        assert!(has_invalid_chars("scr een"));
        assert!(has_invalid_chars("scr-een"));
    }
}
