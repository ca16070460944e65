//! compression/codecs/mod.rs
//! Concrete engines behind the `Compressor` / `Decompressor` seams.

pub mod deflate;

pub use deflate::*;
