//! Streaming zlib compression.
//!
//! Wraps the deflate implementation behind a feed/finish stream
//! transform: the pipeline feeds serializer bytes as they are produced
//! and flushes exactly once at document end. The zlib container format
//! matches the [`FORMAT_ZLIB`](crate::emit::FORMAT_ZLIB) descriptor tag
//! consumers use to select a decompressor.

use std::io;

use flate2::{Compress, Compression, FlushCompress, Status};

/// Output chunk granularity. The compressor is re-invoked with more
/// buffer space until it stops producing output.
const CHUNK: usize = 4096;

/// A streaming zlib compressor.
pub struct StreamCompressor {
    raw: Compress,
    buf: Vec<u8>,
}

impl StreamCompressor {
    /// Create a compressor with the default compression level and a zlib
    /// header.
    pub fn new() -> Self {
        Self {
            raw: Compress::new(Compression::default(), true),
            buf: Vec::new(),
        }
    }

    /// Compress `input`, returning whatever output the compressor
    /// produced for it. The slice is only valid until the next call.
    pub fn feed(&mut self, input: &[u8]) -> io::Result<&[u8]> {
        self.buf.clear();
        let mut consumed = 0;
        while consumed < input.len() {
            self.reserve_output();
            let before = self.raw.total_in();
            self.raw
                .compress_vec(&input[consumed..], &mut self.buf, FlushCompress::None)
                .map_err(into_io_error)?;
            consumed += (self.raw.total_in() - before) as usize;
        }
        Ok(&self.buf)
    }

    /// Flush the stream, returning the final output bytes. Must be
    /// called exactly once, after all input has been fed.
    pub fn finish(&mut self) -> io::Result<&[u8]> {
        self.buf.clear();
        loop {
            self.reserve_output();
            let status = self
                .raw
                .compress_vec(&[], &mut self.buf, FlushCompress::Finish)
                .map_err(into_io_error)?;
            if status == Status::StreamEnd {
                return Ok(&self.buf);
            }
        }
    }

    /// Total bytes fed so far.
    pub fn total_in(&self) -> u64 {
        self.raw.total_in()
    }

    fn reserve_output(&mut self) {
        if self.buf.capacity() - self.buf.len() < CHUNK / 2 {
            self.buf.reserve(CHUNK);
        }
    }
}

impl Default for StreamCompressor {
    fn default() -> Self {
        Self::new()
    }
}

fn into_io_error(err: flate2::CompressError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}
