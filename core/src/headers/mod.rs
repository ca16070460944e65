//! headers/mod.rs
//! Fingerprint header codec.
//!
//! Notes:
//! - The header is the serialized `Fingerprint`, written field by field in a
//!   fixed order: device_name, box_size, center, rotation, size.
//! - Every multi-byte value is little-endian with an explicit width; nothing
//!   depends on in-memory struct layout.
//! - The header has a variable length (the device name), so it is streamed
//!   rather than decoded from a fixed buffer.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
