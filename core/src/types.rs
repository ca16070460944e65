use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::compression::CompressionError;
use crate::headers::HeaderError;

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Direction a cache file was being opened in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::Read => f.write_str("read"),
            OpenMode::Write => f.write_str("write"),
        }
    }
}

/// Where in a call a failure happened.
///
/// Decode runs `Opening -> HeaderValidating -> BodyStreaming`; encode uses
/// the same phases for open, header write and body write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Opening,
    HeaderValidating,
    BodyStreaming,
}

/// Unified error for encode/decode.
/// - `From<T>` impls enable `?` across the header and compression layers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("{}: could not open file to {mode}: {source}", .path.display())]
    Open {
        path: PathBuf,
        mode: OpenMode,
        #[source]
        source: io::Error,
    },

    #[error("header does not match: {0}")]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CacheError {
    /// The expected "no artifact yet" outcome of a decode.
    pub fn is_cache_miss(&self) -> bool {
        matches!(
            self,
            CacheError::Open { mode: OpenMode::Read, source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    /// Stored artifact exists but belongs to another fingerprint (or is malformed).
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            CacheError::Header(HeaderError::FieldMismatch { .. } | HeaderError::FieldMissing { .. })
        )
    }

    pub fn phase(&self) -> Phase {
        match self {
            CacheError::Open { .. } => Phase::Opening,
            CacheError::Header(_) => Phase::HeaderValidating,
            CacheError::Compression(_) | CacheError::Io(_) => Phase::BodyStreaming,
        }
    }
}
