//! The minifying serializer.
//!
//! Re-serializes the validated event stream as canonical, minimal XML:
//! no inter-element whitespace, trimmed text content, self-closing tags
//! wherever an element produced no content. Output is a byte-deterministic
//! function of the event sequence, which reproducible builds rely on.

use std::io::{self, Write};

use quick_xml::escape::escape;

use easel_core::event::{Attributes, EventSink};

/// Serializer writing minified XML to an [`io::Write`].
///
/// Character data is buffered and trimmed; it is only emitted (escaped)
/// when non-empty after trimming, at the next structural event. A start
/// tag is held incomplete until the serializer knows whether the element
/// has content, so empty elements collapse to self-closing form.
pub struct Serializer<W: Write> {
    out: W,
    incomplete_tag: bool,
    content: String,
}

impl<W: Write> Serializer<W> {
    /// Create a serializer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            incomplete_tag: false,
            content: String::new(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_content(&mut self) -> io::Result<()> {
        let trimmed = self.content.trim();
        if !trimmed.is_empty() {
            if self.incomplete_tag {
                self.out.write_all(b">")?;
                self.incomplete_tag = false;
            }
            self.out.write_all(escape(trimmed).as_bytes())?;
        }
        self.content.clear();
        Ok(())
    }
}

impl<W: Write> EventSink for Serializer<W> {
    fn start_document(&mut self) -> io::Result<()> {
        self.out.write_all(b"<?xml version=\"1.0\"?>")
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }

    fn start_element(&mut self, name: &str, attrs: &Attributes) -> io::Result<()> {
        self.flush_content()?;
        if self.incomplete_tag {
            self.out.write_all(b">")?;
        }
        write!(self.out, "<{name}")?;
        for (key, value) in attrs.iter() {
            write!(self.out, " {key}=\"{}\"", escape(value))?;
        }
        self.incomplete_tag = true;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> io::Result<()> {
        self.flush_content()?;
        if self.incomplete_tag {
            self.out.write_all(b"/>")?;
        } else {
            write!(self.out, "</{name}>")?;
        }
        self.incomplete_tag = false;
        Ok(())
    }

    fn characters(&mut self, text: &str) -> io::Result<()> {
        self.content.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    fn serialize(events: impl Fn(&mut Serializer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut serializer = Serializer::new(Vec::new());
        serializer.start_document().unwrap();
        events(&mut serializer).unwrap();
        serializer.end_document().unwrap();
        String::from_utf8(serializer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_element_self_closes() {
        let output = serialize(|s| {
            s.start_element("mamelayout", &attrs(&[("version", "2")]))?;
            s.end_element("mamelayout")
        });

        assert_eq!(output, "<?xml version=\"1.0\"?><mamelayout version=\"2\"/>\n");
    }

    #[test]
    fn test_nested_elements() {
        let output = serialize(|s| {
            s.start_element("mamelayout", &attrs(&[("version", "2")]))?;
            s.start_element("element", &attrs(&[("name", "lamp")]))?;
            s.start_element("rect", &Attributes::new())?;
            s.end_element("rect")?;
            s.end_element("element")?;
            s.end_element("mamelayout")
        });

        assert_eq!(
            output,
            "<?xml version=\"1.0\"?><mamelayout version=\"2\"><element name=\"lamp\"><rect/></element></mamelayout>\n"
        );
    }

    #[test]
    fn test_text_is_trimmed_and_whitespace_only_dropped() {
        let output = serialize(|s| {
            s.start_element("root", &Attributes::new())?;
            s.characters("\n    ")?;
            s.start_element("script", &Attributes::new())?;
            s.characters("  init()  ")?;
            s.end_element("script")?;
            s.characters("\n")?;
            s.end_element("root")
        });

        assert_eq!(
            output,
            "<?xml version=\"1.0\"?><root><script>init()</script></root>\n"
        );
    }

    #[test]
    fn test_text_chunks_accumulate() {
        let output = serialize(|s| {
            s.start_element("script", &Attributes::new())?;
            s.characters(" a")?;
            s.characters("b ")?;
            s.end_element("script")
        });

        assert_eq!(output, "<?xml version=\"1.0\"?><script>ab</script>\n");
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let output = serialize(|s| {
            s.start_element("text", &attrs(&[("string", "a<b & \"c\"")]))?;
            s.characters("x < y & z")?;
            s.end_element("text")
        });

        assert_eq!(
            output,
            "<?xml version=\"1.0\"?><text string=\"a&lt;b &amp; &quot;c&quot;\">x &lt; y &amp; z</text>\n"
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let run = || {
            serialize(|s| {
                s.start_element("mamelayout", &attrs(&[("version", "2")]))?;
                s.characters("  ")?;
                s.start_element("element", &attrs(&[("name", "digit~n~")]))?;
                s.end_element("element")?;
                s.end_element("mamelayout")
            })
        };

        assert_eq!(run(), run());
    }
}
