//! artifact/mod.rs
//! Save and load a voxelized flag volume under its fingerprint.
//!
//! On-disk layout:
//!
//! ```text
//! [ device_name length (u64 LE) ]
//! [ device_name bytes ]
//! [ box_size   3 x f32 LE ]
//! [ center     3 x f32 LE ]
//! [ rotation   9 x f32 LE, row-major ]
//! [ size       f32 LE ]
//! [ zlib body, to EOF ]
//! ```
//!
//! The body inflates to exactly `N` bytes; `N` is not stored and comes from
//! the caller's buffer length.

pub mod encode;
pub mod decode;

pub use encode::*;
pub use decode::*;
