//! src/headers/decode.rs
//!
//! Header decoding and compare-without-commit validation.
//!
//! Design notes:
//! - Field order must match `encode.rs` exactly.
//! - A short read or an oversized length prefix yields `None`; no partial
//!   value is ever produced.
//! - Validation short-circuits on the first missing or mismatching field.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::constants::{fields, MAX_DEVICE_NAME_LEN};
use crate::geometry::{Float3, Float3x3};
use crate::headers::types::{Fingerprint, HeaderError};

/// A value that can be read back as one header field.
pub trait ReadField: Sized {
    /// Read the field, or `None` if the stream cannot supply it.
    fn read_field<R: Read>(r: &mut R) -> Option<Self>;

    /// Exact equality used for validation.
    fn fields_equal(&self, expected: &Self) -> bool;
}

impl ReadField for String {
    fn read_field<R: Read>(r: &mut R) -> Option<Self> {
        let len = r.read_u64::<LittleEndian>().ok()?;
        // Reject before allocating.
        if len >= MAX_DEVICE_NAME_LEN as u64 {
            return None;
        }
        let mut buf = vec![0u8; len as usize];
        r.read_exact(&mut buf).ok()?;
        String::from_utf8(buf).ok()
    }

    fn fields_equal(&self, expected: &Self) -> bool {
        self.as_bytes() == expected.as_bytes()
    }
}

impl ReadField for f32 {
    fn read_field<R: Read>(r: &mut R) -> Option<Self> {
        r.read_f32::<LittleEndian>().ok()
    }

    fn fields_equal(&self, expected: &Self) -> bool {
        self.to_bits() == expected.to_bits()
    }
}

impl ReadField for Float3 {
    fn read_field<R: Read>(r: &mut R) -> Option<Self> {
        let mut a = [0.0f32; 3];
        r.read_f32_into::<LittleEndian>(&mut a).ok()?;
        Some(Float3::from_array(a))
    }

    fn fields_equal(&self, expected: &Self) -> bool {
        self.bits_eq(expected)
    }
}

impl ReadField for Float3x3 {
    fn read_field<R: Read>(r: &mut R) -> Option<Self> {
        let mut m = [0.0f32; 9];
        r.read_f32_into::<LittleEndian>(&mut m).ok()?;
        Some(Float3x3::from_row_major(m))
    }

    fn fields_equal(&self, expected: &Self) -> bool {
        self.bits_eq(expected)
    }
}

/// Read one field and compare it against `expected` without keeping it.
#[inline]
pub fn check_field<R: Read, T: ReadField>(
    r: &mut R,
    expected: &T,
    field: &'static str,
) -> Result<(), HeaderError> {
    match T::read_field(r) {
        None => Err(HeaderError::FieldMissing { field }),
        Some(v) if v.fields_equal(expected) => Ok(()),
        Some(_) => Err(HeaderError::FieldMismatch { field }),
    }
}

/// Validate a stored header against the caller's current fingerprint.
///
/// On success the reader is positioned at the first body byte.
pub fn validate_fingerprint<R: Read>(r: &mut R, expected: &Fingerprint) -> Result<(), HeaderError> {
    check_field(r, &expected.device_name, fields::DEVICE_NAME)?;
    check_field(r, &expected.box_size, fields::BOX_SIZE)?;
    check_field(r, &expected.center, fields::CENTER)?;
    check_field(r, &expected.rotation, fields::ROTATION)?;
    check_field(r, &expected.size, fields::SIZE)?;
    Ok(())
}

/// Read a whole fingerprint header, e.g. to inspect a cache file.
pub fn read_fingerprint<R: Read>(r: &mut R) -> Result<Fingerprint, HeaderError> {
    let device_name = String::read_field(r)
        .ok_or(HeaderError::FieldMissing { field: fields::DEVICE_NAME })?;
    let box_size = Float3::read_field(r)
        .ok_or(HeaderError::FieldMissing { field: fields::BOX_SIZE })?;
    let center = Float3::read_field(r)
        .ok_or(HeaderError::FieldMissing { field: fields::CENTER })?;
    let rotation = Float3x3::read_field(r)
        .ok_or(HeaderError::FieldMissing { field: fields::ROTATION })?;
    let size = f32::read_field(r)
        .ok_or(HeaderError::FieldMissing { field: fields::SIZE })?;

    Ok(Fingerprint { device_name, box_size, center, rotation, size })
}
