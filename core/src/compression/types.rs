//! compression/types.rs
//! Engine step results, errors, and the compressor/decompressor seams.
use std::fmt;

/// Which direction an engine was running in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineOp {
    Deflate,
    Inflate,
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineOp::Deflate => f.write_str("deflate"),
            EngineOp::Inflate => f.write_str("inflate"),
        }
    }
}

/// Outcome of a single engine call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// Some input was consumed or some output produced.
    Progress,
    /// The compressed stream is complete.
    StreamEnd,
    /// Nothing could be done with the buffers supplied.
    Stalled,
}

/// Bytes consumed/produced by one engine call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineStep {
    pub consumed: usize,
    pub produced: usize,
    pub status: EngineStatus,
}

#[derive(Debug)]
pub enum CompressionError {
    /// The engine reported a data or state error.
    Engine { op: EngineOp, msg: String },
    /// The engine could make no progress where progress was required.
    NoProgress { op: EngineOp },
    /// The decompressor claims more output than was still outstanding.
    BufferOverflow { produced: usize, remaining: usize },
    /// Source exhausted before the expected number of bytes was produced.
    StreamEndedEarly { remaining: usize, expected: usize },
    /// Volume filled but the compressed stream never reached its end.
    MissingStreamEnd { expected: usize },
    /// Reading the source or writing the destination failed.
    Io(std::io::Error),
}

impl From<std::io::Error> for CompressionError {
    fn from(e: std::io::Error) -> Self {
        CompressionError::Io(e)
    }
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            Engine { op: EngineOp::Deflate, msg } =>
                write!(f, "error compressing memory: {}", msg),
            Engine { op: EngineOp::Inflate, msg } =>
                write!(f, "error decompressing memory: {}", msg),
            NoProgress { op } =>
                write!(f, "{} engine made no progress", op),
            BufferOverflow { produced, remaining } =>
                write!(f, "buffer overflow after decompressing data: {} > {}", produced, remaining),
            StreamEndedEarly { remaining, expected } =>
                write!(f, "buffer not complete after decompressing data: {} of {} bytes missing", remaining, expected),
            MissingStreamEnd { expected } =>
                write!(f, "compressed stream ended early after {} bytes: missing end of stream", expected),
            Io(e) =>
                write!(f, "compression stream I/O error: {}", e),
        }
    }
}

impl std::error::Error for CompressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompressionError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Stateful compressor fed one chunk at a time.
pub trait Compressor {
    /// Compress from `input` into `output`. `finish` marks the final input.
    fn compress_step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        finish: bool,
    ) -> Result<EngineStep, CompressionError>;
}

/// Stateful decompressor fed one chunk at a time.
pub trait Decompressor {
    /// Decompress from `input` into `output`.
    fn decompress_step(&mut self, input: &[u8], output: &mut [u8]) -> Result<EngineStep, CompressionError>;
}
