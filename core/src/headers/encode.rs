//! src/headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Field order must match `decode.rs` exactly; it is part of the format.
//! - Text is a u64 LE length prefix followed by raw bytes.
//! - Floats are written as their IEEE-754 bits, little-endian.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::constants::MAX_DEVICE_NAME_LEN;
use crate::geometry::{Float3, Float3x3};
use crate::headers::types::{Fingerprint, HeaderError};

/// A value that can be written as one header field.
pub trait WriteField {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError>;
}

impl WriteField for str {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError> {
        if self.len() >= MAX_DEVICE_NAME_LEN {
            return Err(HeaderError::device_name_too_long(self.len()));
        }
        w.write_u64::<LittleEndian>(self.len() as u64)?;
        w.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl WriteField for String {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError> {
        self.as_str().write_field(w)
    }
}

impl WriteField for f32 {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError> {
        w.write_f32::<LittleEndian>(*self)?;
        Ok(())
    }
}

impl WriteField for Float3 {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError> {
        for v in self.to_array() {
            w.write_f32::<LittleEndian>(v)?;
        }
        Ok(())
    }
}

impl WriteField for Float3x3 {
    fn write_field<W: Write>(&self, w: &mut W) -> Result<(), HeaderError> {
        for v in self.m {
            w.write_f32::<LittleEndian>(v)?;
        }
        Ok(())
    }
}

/// Write the full fingerprint header in wire order.
///
/// # Returns
/// - `Ok(n)` with the number of header bytes written.
/// - `Err(HeaderError)` if the device name is too long or the stream fails.
///
/// # Notes
/// - The name length is checked before anything is written, so an
///   oversized name never leaves a partial header behind.
pub fn write_fingerprint<W: Write>(w: &mut W, fp: &Fingerprint) -> Result<usize, HeaderError> {
    if fp.device_name.len() >= MAX_DEVICE_NAME_LEN {
        return Err(HeaderError::device_name_too_long(fp.device_name.len()));
    }

    fp.device_name.write_field(w)?; // length prefix + bytes
    fp.box_size.write_field(w)?;    // 3 x f32
    fp.center.write_field(w)?;      // 3 x f32
    fp.rotation.write_field(w)?;    // 9 x f32, row-major
    fp.size.write_field(w)?;        // f32

    Ok(fp.encoded_len())
}

/// Serialize a fingerprint header into an owned buffer.
pub fn encode_fingerprint(fp: &Fingerprint) -> Result<Vec<u8>, HeaderError> {
    let mut out = Vec::with_capacity(fp.encoded_len());
    let n = write_fingerprint(&mut out, fp)?;

    // Sanity check: ensure we wrote exactly the advertised length.
    debug_assert_eq!(n, out.len(), "header encoding wrote incorrect length");

    Ok(out)
}
