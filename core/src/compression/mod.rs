//! compression/mod.rs
//! Streaming zlib pipeline for flag volumes.
//!
//! Notes:
//! - Chunk size and effort level are fixed constants, not caller options.
//! - One engine per call; the engine's stream state carries across chunks,
//!   so chunks are never reordered or processed in parallel.

pub mod constants;
pub mod types;
pub mod codecs;
pub mod stream;

pub use constants::*;
pub use types::*;
pub use stream::*;
