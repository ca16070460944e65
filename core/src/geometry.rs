//! geometry.rs
//! Small fixed-size vector/matrix types carried in the fingerprint.
//!
//! These are plain value types; the voxelizer that consumes them lives
//! outside this crate. Equality used for cache validation is bit-exact
//! (see `bits_eq`), not IEEE equality.

use serde::{Deserialize, Serialize};

/// Three-component `f32` vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(a: [f32; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }

    /// Bit-for-bit comparison of every component.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl From<[f32; 3]> for Float3 {
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

/// Row-major 3x3 `f32` matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Float3x3 {
    pub m: [f32; 9],
}

impl Float3x3 {
    pub const IDENTITY: Float3x3 = Float3x3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub const fn from_row_major(m: [f32; 9]) -> Self {
        Self { m }
    }

    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        let mut m = [0.0f32; 9];
        for (r, row) in rows.iter().enumerate() {
            m[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self { m }
    }

    /// Element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 3 + col]
    }

    pub fn bits_eq(&self, other: &Self) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Default for Float3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute context a volume was voxelized for.
///
/// The cache only ever asks for the display name; device management is
/// the caller's business.
pub trait ComputeDevice {
    fn name(&self) -> &str;
}

/// Minimal `ComputeDevice` carrying just a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDevice(pub String);

impl NamedDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl ComputeDevice for NamedDevice {
    fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_eq_distinguishes_signed_zero() {
        let a = Float3::new(0.0, 1.0, 2.0);
        let b = Float3::new(-0.0, 1.0, 2.0);
        assert_eq!(a, b);
        assert!(!a.bits_eq(&b));
    }

    #[test]
    fn bits_eq_accepts_identical_nan() {
        let a = Float3::splat(f32::NAN);
        assert!(a.bits_eq(&a));
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = Float3x3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(2, 0), 7.0);
        assert_eq!(m.m, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
