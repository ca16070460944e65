//! Header format constants shared by the encoder and decoder.

/// Hard ceiling on the stored device name length, in bytes.
/// A declared length at or above this value is treated as a corrupt header.
pub const MAX_DEVICE_NAME_LEN: usize = 1024;

/// Width of the device name length prefix (u64, the 64-bit size-type width).
pub const NAME_LEN_PREFIX_BYTES: usize = 8;

/// Bytes of one `f32` on the wire.
pub const F32_BYTES: usize = 4;

/// Fixed-width part of the header: box_size (3) + center (3) + rotation (9) + size (1).
pub const HEADER_FIXED_LEN: usize = (3 + 3 + 9 + 1) * F32_BYTES;

/// Field names in wire order, used in diagnostics.
pub mod fields {
    pub const DEVICE_NAME: &str = "device_name";
    pub const BOX_SIZE: &str = "box_size";
    pub const CENTER: &str = "center";
    pub const ROTATION: &str = "rotation";
    pub const SIZE: &str = "size";
}
