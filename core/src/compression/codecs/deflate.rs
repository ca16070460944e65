//! Deflate (zlib wrapper) engines via flate2's low-level stream API.
//!
//! Each engine owns one zlib stream state for the duration of a single
//! encode or decode call. The state is released when the engine drops,
//! which happens exactly once on every exit path.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::types::{
    CompressionError, Compressor, Decompressor, EngineOp, EngineStatus, EngineStep,
};

fn map_status(status: Status, consumed: usize, produced: usize) -> EngineStatus {
    match status {
        Status::StreamEnd => EngineStatus::StreamEnd,
        Status::BufError => EngineStatus::Stalled,
        Status::Ok if consumed == 0 && produced == 0 => EngineStatus::Stalled,
        Status::Ok => EngineStatus::Progress,
    }
}

pub struct DeflateEngine {
    strm: Compress,
}

impl DeflateEngine {
    /// Start a zlib stream at `level` (clamped to 0..=9).
    pub fn new(level: u32) -> Self {
        Self { strm: Compress::new(Compression::new(level.min(9)), true) }
    }

    pub fn total_in(&self) -> u64 {
        self.strm.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.strm.total_out()
    }
}

impl Compressor for DeflateEngine {
    fn compress_step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        finish: bool,
    ) -> Result<EngineStep, CompressionError> {
        let flush = if finish { FlushCompress::Finish } else { FlushCompress::None };
        let before_in = self.strm.total_in();
        let before_out = self.strm.total_out();

        let status = self
            .strm
            .compress(input, output, flush)
            .map_err(|e| CompressionError::Engine { op: EngineOp::Deflate, msg: e.to_string() })?;

        let consumed = (self.strm.total_in() - before_in) as usize;
        let produced = (self.strm.total_out() - before_out) as usize;
        Ok(EngineStep { consumed, produced, status: map_status(status, consumed, produced) })
    }
}

impl Drop for DeflateEngine {
    fn drop(&mut self) {
        tracing::trace!(total_in = self.strm.total_in(), total_out = self.strm.total_out(), "deflate engine released");
    }
}

pub struct InflateEngine {
    strm: Decompress,
}

impl InflateEngine {
    pub fn new() -> Self {
        Self { strm: Decompress::new(true) }
    }

    pub fn total_in(&self) -> u64 {
        self.strm.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.strm.total_out()
    }
}

impl Default for InflateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Decompressor for InflateEngine {
    fn decompress_step(&mut self, input: &[u8], output: &mut [u8]) -> Result<EngineStep, CompressionError> {
        let before_in = self.strm.total_in();
        let before_out = self.strm.total_out();

        let status = self
            .strm
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| CompressionError::Engine { op: EngineOp::Inflate, msg: e.to_string() })?;

        let consumed = (self.strm.total_in() - before_in) as usize;
        let produced = (self.strm.total_out() - before_out) as usize;
        Ok(EngineStep { consumed, produced, status: map_status(status, consumed, produced) })
    }
}

impl Drop for InflateEngine {
    fn drop(&mut self) {
        tracing::trace!(total_in = self.strm.total_in(), total_out = self.strm.total_out(), "inflate engine released");
    }
}
