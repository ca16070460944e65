//! voxcache-core
//!
//! Fingerprinted on-disk cache for voxelized geometry.
//! Stores a flag volume behind a header of the voxelization parameters and
//! loads it back only when those parameters match bit for bit.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod geometry;
pub mod types;

// Codec layers
pub mod headers;
pub mod compression;
pub mod telemetry;

// Operations
pub mod artifact;
pub mod cache;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::artifact::{decode, encode, try_decode, try_encode};
    pub use crate::cache::{CacheConfig, CacheOutcome, VoxelCache};
    pub use crate::geometry::{ComputeDevice, Float3, Float3x3, NamedDevice};
    pub use crate::headers::Fingerprint;
    pub use crate::types::{CacheError, CacheResult};
}
