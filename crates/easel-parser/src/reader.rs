//! Adapter from the underlying XML tokenizer to located events.
//!
//! Wraps quick-xml's pull parser and drives a [`Validator`] with
//! start-element, end-element, and character-data events, each stamped
//! with the position of its opening byte. Self-closing tags are expanded
//! into start/end pairs so downstream consumers see one uniform stream.
//!
//! Malformed markup is a [`FatalError`]: the pass aborts immediately and
//! the failure is reported as the sole diagnostic. This is distinct from
//! schema violations, which accumulate inside the validator.

use std::io;
use std::str;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use easel_core::event::{Attributes, EventSink};
use easel_core::location::Location;

use crate::error::{Diagnostic, FatalError};
use crate::validator::Validator;

/// Failure while driving the event stream.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The document is not well-formed XML.
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// The downstream sink failed to write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parse `source` and feed the full event stream to `validator`.
///
/// Returns `Ok(())` when the document was well-formed and every event was
/// delivered; schema findings are left inside the validator. Returns a
/// [`ReaderError`] when the tokenizer hit malformed markup or the sink
/// failed.
pub fn parse_document<S: EventSink>(
    source: &str,
    validator: &mut Validator<S>,
) -> Result<(), ReaderError> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.expand_empty_elements = true;
    config.check_end_names = true;

    let mut tracker = PositionTracker::new(source);
    let mut saw_element = false;

    validator.start_document()?;
    loop {
        let location = tracker.locate(reader.buffer_position() as usize);
        match reader.read_event() {
            Err(err) => return Err(fatal(err.to_string(), location)),
            Ok(Event::Start(start)) => {
                saw_element = true;
                let (name, attrs) = convert_start(&start, location)?;
                validator.start_element(&name, &attrs, location)?;
            }
            Ok(Event::Empty(start)) => {
                // Unreachable with expand_empty_elements, but harmless.
                saw_element = true;
                let (name, attrs) = convert_start(&start, location)?;
                validator.start_element(&name, &attrs, location)?;
                validator.end_element(&name)?;
            }
            Ok(Event::End(end)) => {
                let name = decode(end.name().as_ref(), location)?;
                validator.end_element(&name)?;
            }
            Ok(Event::Text(text)) => match text.unescape() {
                Ok(content) => validator.characters(&content)?,
                Err(err) => return Err(fatal(err.to_string(), location)),
            },
            Ok(Event::CData(cdata)) => {
                let content = decode(cdata.as_ref(), location)?;
                validator.characters(&content)?;
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => {
                if !saw_element {
                    return Err(fatal("no element found", location));
                }
                break;
            }
        }
    }
    validator.end_document()?;
    Ok(())
}

fn convert_start(
    start: &BytesStart<'_>,
    location: Location,
) -> Result<(String, Attributes), ReaderError> {
    let name = decode(start.name().as_ref(), location)?;
    let mut attrs = Attributes::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| fatal(err.to_string(), location))?;
        let key = decode(attr.key.as_ref(), location)?;
        let value = attr
            .unescape_value()
            .map_err(|err| fatal(err.to_string(), location))?;
        attrs.push(key, value);
    }
    Ok((name, attrs))
}

fn decode(bytes: &[u8], location: Location) -> Result<String, ReaderError> {
    str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| fatal(err.to_string(), location))
}

fn fatal(message: impl Into<String>, location: Location) -> ReaderError {
    ReaderError::Fatal(FatalError::new(
        Diagnostic::error(message).with_label(location, "malformed document"),
    ))
}

/// Incremental byte-offset to line/column translation.
///
/// Offsets from the tokenizer are monotonic, so each lookup only scans
/// the bytes consumed since the previous one. Columns count characters,
/// not bytes: UTF-8 continuation bytes do not advance the column.
struct PositionTracker<'src> {
    source: &'src [u8],
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> PositionTracker<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn locate(&mut self, offset: usize) -> Location {
        let target = offset.min(self.source.len());
        for &byte in &self.source[self.offset..target] {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if byte & 0xC0 != 0x80 {
                self.column += 1;
            }
        }
        self.offset = target;
        Location::new(target, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracker_lines_and_columns() {
        let source = "ab\ncd\ne";
        let mut tracker = PositionTracker::new(source);

        assert_eq!(tracker.locate(0), Location::new(0, 1, 1));
        assert_eq!(tracker.locate(2), Location::new(2, 1, 3));
        assert_eq!(tracker.locate(3), Location::new(3, 2, 1));
        assert_eq!(tracker.locate(6), Location::new(6, 3, 1));
    }

    #[test]
    fn test_position_tracker_multibyte_columns() {
        // One em dash is three bytes but a single column.
        let source = "a\u{2014}b";
        let mut tracker = PositionTracker::new(source);

        assert_eq!(tracker.locate(4), Location::new(4, 1, 3));
    }

    #[test]
    fn test_malformed_markup_is_fatal() {
        let mut validator = Validator::new(());
        let result = parse_document("<mamelayout version=\"2\"><view></mamelayout>", &mut validator);

        assert!(matches!(result, Err(ReaderError::Fatal(_))));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let mut validator = Validator::new(());
        let result = parse_document("   ", &mut validator);

        assert!(matches!(result, Err(ReaderError::Fatal(_))));
    }
}
