//! Byte array and descriptor emission.
//!
//! Formats the compressed document as a C source fragment: a static byte
//! array holding the data and a descriptor record pairing it with size
//! metadata and the compression format tag, ready for inclusion in
//! generated source.

use std::io::{self, Write};

/// Format tag identifying zlib-compressed data to the consumer.
pub const FORMAT_ZLIB: u32 = 1;

/// Values per line in the emitted array literal.
const VALUES_PER_LINE: u64 = 32;

/// Emitter for the embeddable artifact.
///
/// Bytes are written as fixed-width decimal literals, comma-separated,
/// wrapped every [`VALUES_PER_LINE`] values onto a new tab-indented line.
pub struct ByteArrayEmitter<W: Write> {
    out: W,
    emitted: u64,
}

impl<W: Write> ByteArrayEmitter<W> {
    /// Create an emitter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, emitted: 0 }
    }

    /// Write the array declaration opening.
    pub fn write_array_header(&mut self, symbol: &str) -> io::Result<()> {
        writeln!(self.out, "static const unsigned char {symbol}_data[] = {{")
    }

    /// Append bytes to the array literal.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &byte in bytes {
            if self.emitted == 0 {
                self.out.write_all(b"\t")?;
            } else if self.emitted % VALUES_PER_LINE == 0 {
                self.out.write_all(b",\n\t")?;
            } else {
                self.out.write_all(b", ")?;
            }
            write!(self.out, "{byte:3}")?;
            self.emitted += 1;
        }
        Ok(())
    }

    /// Close the array declaration.
    pub fn finish_array(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n};\n\n")
    }

    /// Write the descriptor record referencing the array.
    pub fn write_descriptor(&mut self, symbol: &str, uncompressed_size: u64) -> io::Result<()> {
        writeln!(self.out, "const internal_layout {symbol} = {{")?;
        writeln!(
            self.out,
            "\t{uncompressed_size}, sizeof({symbol}_data), {FORMAT_ZLIB}, {symbol}_data"
        )?;
        writeln!(self.out, "}};")
    }

    /// Number of array bytes emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(bytes: &[u8]) -> String {
        let mut emitter = ByteArrayEmitter::new(Vec::new());
        emitter.write_array_header("layout_test").unwrap();
        emitter.write_bytes(bytes).unwrap();
        emitter.finish_array().unwrap();
        emitter.write_descriptor("layout_test", 99).unwrap();
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_format_is_fixed_width_comma_separated() {
        let output = emit(&[0, 7, 255]);

        assert!(output.starts_with(
            "static const unsigned char layout_test_data[] = {\n\t  0,   7, 255\n};\n\n"
        ));
    }

    #[test]
    fn test_line_wraps_every_32_values() {
        let output = emit(&[1u8; 33]);
        let array_body: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with('\t') && line.contains("  1"))
            .collect();

        assert_eq!(array_body.len(), 2);
        assert_eq!(array_body[0].matches("  1").count(), 32);
        assert!(array_body[0].ends_with(','));
        // The 33rd value lands alone on the second line.
        assert_eq!(array_body[1].trim(), "1");
    }

    #[test]
    fn test_descriptor_record() {
        let output = emit(&[42]);

        assert!(output.ends_with(
            "const internal_layout layout_test = {\n\t99, sizeof(layout_test_data), 1, layout_test_data\n};\n"
        ));
    }

    #[test]
    fn test_emitted_count() {
        let mut emitter = ByteArrayEmitter::new(Vec::new());
        emitter.write_bytes(&[1, 2, 3]).unwrap();
        emitter.write_bytes(&[4]).unwrap();

        assert_eq!(emitter.emitted(), 4);
    }
}
