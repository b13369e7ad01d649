//! Positions of parse events in the source document.

use std::fmt;

/// A position in the source document.
///
/// Captured by the event reader immediately before each event is delivered,
/// and stamped onto diagnostics and first-definition/first-reference
/// records. `line` and `column` are 1-based; `offset` is the byte index of
/// the event's opening byte, kept so reporting layers can derive precise
/// source spans without re-scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    offset: usize,
    line: u32,
    column: u32,
}

impl Location {
    /// Create a location from a byte offset and 1-based line/column.
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The start of a document.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Byte offset into the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number.
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Location::new(42, 3, 7).to_string(), "3:7");
    }

    #[test]
    fn test_start() {
        let loc = Location::start();
        assert_eq!(loc.offset(), 0);
        assert_eq!(loc.line(), 1);
        assert_eq!(loc.column(), 1);
        assert_eq!(loc, Location::default());
    }
}
