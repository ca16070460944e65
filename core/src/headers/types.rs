//! headers/types.rs
//! Fingerprint type and header errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HEADER_FIXED_LEN, MAX_DEVICE_NAME_LEN, NAME_LEN_PREFIX_BYTES};
use crate::geometry::{ComputeDevice, Float3, Float3x3};

/// Geometry parameters a flag volume was voxelized with.
///
/// A stored artifact is valid for exactly one fingerprint value. Float
/// fields are compared bit-for-bit, no tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub device_name: String,
    pub box_size: Float3,
    pub center: Float3,
    pub rotation: Float3x3,
    pub size: f32,
}

impl Fingerprint {
    pub fn new(
        device_name: impl Into<String>,
        box_size: Float3,
        center: Float3,
        rotation: Float3x3,
        size: f32,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            box_size,
            center,
            rotation,
            size,
        }
    }

    /// Build a fingerprint, taking the device name from a compute context.
    pub fn for_device<D: ComputeDevice + ?Sized>(
        device: &D,
        box_size: Float3,
        center: Float3,
        rotation: Float3x3,
        size: f32,
    ) -> Self {
        Self::new(device.name(), box_size, center, rotation, size)
    }

    /// Exact number of header bytes this fingerprint encodes to.
    pub fn encoded_len(&self) -> usize {
        NAME_LEN_PREFIX_BYTES + self.device_name.len() + HEADER_FIXED_LEN
    }

    /// Canonical fingerprint used throughout the tests.
    pub fn test_fingerprint() -> Self {
        Self::new(
            "GPU0",
            Float3::splat(1.0),
            Float3::splat(0.0),
            Float3x3::IDENTITY,
            0.01,
        )
    }

    /// Bit-exact equality on every field.
    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.device_name == other.device_name
            && self.box_size.bits_eq(&other.box_size)
            && self.center.bits_eq(&other.center)
            && self.rotation.bits_eq(&other.rotation)
            && self.size.to_bits() == other.size.to_bits()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} box=({}, {}, {}) center=({}, {}, {}) size={}",
            self.device_name,
            self.box_size.x,
            self.box_size.y,
            self.box_size.z,
            self.center.x,
            self.center.y,
            self.center.z,
            self.size
        )
    }
}

#[derive(Debug)]
pub enum HeaderError {
    /// Underlying stream failed while writing the header.
    Io(std::io::Error),

    /// Device name cannot be stored (it would be rejected on read).
    DeviceNameTooLong { len: usize, max: usize },

    /// Field missing, truncated, or over the size ceiling.
    FieldMissing { field: &'static str },

    /// Field present but differs from the expected fingerprint.
    FieldMismatch { field: &'static str },
}

impl HeaderError {
    pub fn device_name_too_long(len: usize) -> Self {
        HeaderError::DeviceNameTooLong { len, max: MAX_DEVICE_NAME_LEN - 1 }
    }

    /// Name of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            HeaderError::FieldMissing { field } | HeaderError::FieldMismatch { field } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            Io(e) =>
                write!(f, "header I/O error: {}", e),
            DeviceNameTooLong { len, max } =>
                write!(f, "device name too long: {} > {}", len, max),
            FieldMissing { field } =>
                write!(f, "header field missing or truncated: {}", field),
            FieldMismatch { field } =>
                write!(f, "header field does not match: {}", field),
        }
    }
}

impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeaderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Allow `?` on std::io::Error
impl From<std::io::Error> for HeaderError {
    fn from(e: std::io::Error) -> Self {
        HeaderError::Io(e)
    }
}
