//! Easel - A compiler for layout documents.
//!
//! Validates a layout XML document against its structural grammar,
//! re-serializes it in canonical minified form, compresses it with zlib,
//! and emits it as a C byte-array artifact with a size/format descriptor
//! for inclusion in generated source.

pub mod compress;
pub mod emit;
pub mod minify;

mod error;

pub use emit::FORMAT_ZLIB;
pub use error::EaselError;

use std::io::{self, Write};

use log::{debug, info};

use easel_parser::Validator;
use easel_parser::reader::{self, ReaderError};

use compress::StreamCompressor;
use emit::ByteArrayEmitter;
use minify::Serializer;

/// Size counters for a completed compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileStats {
    /// Bytes of minified serialization fed to the compressor.
    pub uncompressed_size: u64,
    /// Bytes emitted into the array literal.
    pub compressed_size: u64,
}

/// Compiler for layout documents.
///
/// This wires the single-pass pipeline together: the event reader drives
/// the validator, which forwards the stream to the minifying serializer,
/// whose output is compressed and formatted into the artifact.
///
/// # Examples
///
/// ```rust,no_run
/// use easel::LayoutCompiler;
///
/// let source = r#"<mamelayout version="2"><view name="Main"/></mamelayout>"#;
///
/// let mut artifact = Vec::new();
/// let stats = LayoutCompiler::new()
///     .compile(source, "layout_main", &mut artifact)
///     .expect("valid layout");
///
/// assert!(stats.compressed_size > 0);
/// ```
#[derive(Debug, Default)]
pub struct LayoutCompiler;

impl LayoutCompiler {
    /// Create a new layout compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compile `source` into an artifact written to `out`.
    ///
    /// The artifact is written incrementally during the single pass. On
    /// any error the artifact is incomplete; callers owning a file
    /// destination must delete it (see the CLI crate).
    ///
    /// # Errors
    ///
    /// Returns [`EaselError`] for:
    /// - Malformed XML (`Syntax`), reported as the sole diagnostic
    /// - Accumulated grammar violations (`Validation`)
    /// - Write failures on `out` (`Io`)
    pub fn compile<W: Write>(
        &self,
        source: &str,
        symbol: &str,
        out: W,
    ) -> Result<CompileStats, EaselError> {
        info!(symbol; "Compiling layout");

        let mut emitter = ByteArrayEmitter::new(out);
        emitter.write_array_header(symbol)?;

        let pipeline = CompressingWriter::new(emitter);
        let mut validator = Validator::new(Serializer::new(pipeline));

        reader::parse_document(source, &mut validator).map_err(|err| match err {
            ReaderError::Fatal(fatal) => EaselError::new_syntax_error(fatal, source),
            ReaderError::Io(io_err) => EaselError::Io(io_err),
        })?;

        let (serializer, outcome) = validator.finish();
        outcome.map_err(|err| EaselError::new_validation_error(err, source))?;

        let (stats, mut emitter) = serializer.into_inner().finish()?;
        emitter.finish_array()?;
        emitter.write_descriptor(symbol, stats.uncompressed_size)?;

        debug!(
            uncompressed_size = stats.uncompressed_size,
            compressed_size = stats.compressed_size;
            "Layout compiled"
        );
        Ok(stats)
    }
}

/// Write adapter feeding serializer output through the compressor into
/// the emitter, tracking the uncompressed byte count.
struct CompressingWriter<W: Write> {
    compressor: StreamCompressor,
    emitter: ByteArrayEmitter<W>,
    uncompressed: u64,
}

impl<W: Write> CompressingWriter<W> {
    fn new(emitter: ByteArrayEmitter<W>) -> Self {
        Self {
            compressor: StreamCompressor::new(),
            emitter,
            uncompressed: 0,
        }
    }

    /// Flush the compressor exactly once and yield the counters along
    /// with the emitter for the trailing artifact sections.
    fn finish(mut self) -> io::Result<(CompileStats, ByteArrayEmitter<W>)> {
        let tail = self.compressor.finish()?;
        self.emitter.write_bytes(tail)?;
        Ok((
            CompileStats {
                uncompressed_size: self.uncompressed,
                compressed_size: self.emitter.emitted(),
            },
            self.emitter,
        ))
    }
}

impl<W: Write> Write for CompressingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.uncompressed += buf.len() as u64;
        let compressed = self.compressor.feed(buf)?;
        self.emitter.write_bytes(compressed)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
