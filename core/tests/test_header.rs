// Header codec suite: wire layout, field-by-field validation, truncation and
// size-ceiling handling.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;
    use voxcache_core::{
        constants::{fields, HEADER_FIXED_LEN, MAX_DEVICE_NAME_LEN, NAME_LEN_PREFIX_BYTES},
        geometry::{Float3, Float3x3, NamedDevice},
        headers::{
            encode_fingerprint, read_fingerprint, validate_fingerprint, write_fingerprint, Fingerprint,
            HeaderError, ReadField, WriteField,
        },
    };

    fn fp() -> Fingerprint {
        Fingerprint::test_fingerprint()
    }

// ## 1️⃣ Wire layout

    #[test]
    fn encoded_len_matches_bytes_written() {
        let f = fp();
        let bytes = encode_fingerprint(&f).unwrap();
        assert_eq!(bytes.len(), f.encoded_len());
        assert_eq!(bytes.len(), NAME_LEN_PREFIX_BYTES + 4 + HEADER_FIXED_LEN);
    }

    #[test]
    fn layout_is_prefix_name_then_little_endian_floats() {
        let bytes = encode_fingerprint(&fp()).unwrap();

        assert_eq!(&bytes[0..8], &4u64.to_le_bytes());
        assert_eq!(&bytes[8..12], b"GPU0");
        // box_size = (1, 1, 1)
        for i in 0..3 {
            let off = 12 + i * 4;
            assert_eq!(&bytes[off..off + 4], &1.0f32.to_le_bytes());
        }
        // center = (0, 0, 0)
        for i in 0..3 {
            let off = 24 + i * 4;
            assert_eq!(&bytes[off..off + 4], &0.0f32.to_le_bytes());
        }
        // rotation row-major identity
        let rot: Vec<f32> = bytes[36..72]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(rot, Float3x3::IDENTITY.m.to_vec());
        // size
        assert_eq!(&bytes[72..76], &0.01f32.to_le_bytes());
    }

    #[test]
    fn write_fingerprint_reports_length() {
        let mut out = Vec::new();
        let n = write_fingerprint(&mut out, &fp()).unwrap();
        assert_eq!(n, out.len());
    }

    #[test]
    fn for_device_takes_device_name() {
        let dev = NamedDevice::new("Radeon Pro");
        let f = Fingerprint::for_device(&dev, Float3::splat(2.0), Float3::splat(0.5), Float3x3::IDENTITY, 0.1);
        assert_eq!(f.device_name, "Radeon Pro");
    }

// ## 2️⃣ Validation – success and positioning

    #[test]
    fn validate_accepts_identical_fingerprint() {
        let bytes = encode_fingerprint(&fp()).unwrap();
        validate_fingerprint(&mut Cursor::new(bytes), &fp()).unwrap();
    }

    #[test]
    fn validate_leaves_reader_at_body() {
        let mut bytes = encode_fingerprint(&fp()).unwrap();
        bytes.extend_from_slice(&[0xAB, 0xCD]);
        let mut cur = Cursor::new(bytes);
        validate_fingerprint(&mut cur, &fp()).unwrap();
        assert_eq!(cur.position() as usize, fp().encoded_len());
    }

    #[test]
    fn read_fingerprint_round_trips() {
        let f = Fingerprint::new(
            "NVIDIA GeForce RTX 4090",
            Float3::new(1.5, 2.5, 3.5),
            Float3::new(-1.0, 0.25, 8.0),
            Float3x3::from_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
            0.125,
        );
        let bytes = encode_fingerprint(&f).unwrap();
        let back = read_fingerprint(&mut Cursor::new(bytes)).unwrap();
        assert!(back.matches(&f));
    }

// ## 3️⃣ Validation – one field at a time

    // Each case differs from the stored header in exactly one field.
    fn one_field_variants() -> Vec<(&'static str, Fingerprint)> {
        let base = fp();
        vec![
            (fields::DEVICE_NAME, Fingerprint { device_name: "GPU1".into(), ..base.clone() }),
            (fields::BOX_SIZE, Fingerprint { box_size: Float3::new(1.0, 1.0, 2.0), ..base.clone() }),
            (fields::CENTER, Fingerprint { center: Float3::new(0.0, 0.5, 0.0), ..base.clone() }),
            (
                fields::ROTATION,
                Fingerprint {
                    rotation: Float3x3::from_rows([[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]]),
                    ..base.clone()
                },
            ),
            (fields::SIZE, Fingerprint { size: 0.02, ..base.clone() }),
        ]
    }

    #[test]
    fn validate_names_first_mismatching_field() {
        let stored = encode_fingerprint(&fp()).unwrap();
        for (field, expected) in one_field_variants() {
            let err = validate_fingerprint(&mut Cursor::new(stored.clone()), &expected).unwrap_err();
            match err {
                HeaderError::FieldMismatch { field: f } => assert_eq!(f, field),
                other => panic!("expected mismatch on {field}, got {other}"),
            }
        }
    }

    #[test]
    fn signed_zero_is_a_mismatch() {
        let stored = encode_fingerprint(&fp()).unwrap();
        let expected = Fingerprint { center: Float3::new(-0.0, 0.0, 0.0), ..fp() };
        let err = validate_fingerprint(&mut Cursor::new(stored), &expected).unwrap_err();
        assert_eq!(err.field(), Some(fields::CENTER));
    }

    #[test]
    fn device_name_prefix_is_a_mismatch() {
        let stored = encode_fingerprint(&Fingerprint { device_name: "GPU".into(), ..fp() }).unwrap();
        let err = validate_fingerprint(&mut Cursor::new(stored), &fp()).unwrap_err();
        assert!(matches!(err, HeaderError::FieldMismatch { field: fields::DEVICE_NAME }));
    }

// ## 4️⃣ Truncation and corrupt headers

    #[test]
    fn truncation_at_every_offset_is_missing_field() {
        let stored = encode_fingerprint(&fp()).unwrap();
        for cut in 0..stored.len() {
            let err = validate_fingerprint(&mut Cursor::new(&stored[..cut]), &fp()).unwrap_err();
            assert!(
                matches!(err, HeaderError::FieldMissing { .. }),
                "cut at {cut}: unexpected {err}"
            );
        }
    }

    #[test]
    fn truncation_reports_the_cut_field() {
        let stored = encode_fingerprint(&fp()).unwrap();
        // Cut inside the rotation matrix (starts at byte 36).
        let err = validate_fingerprint(&mut Cursor::new(&stored[..40]), &fp()).unwrap_err();
        assert_eq!(err.field(), Some(fields::ROTATION));
    }

    #[test]
    fn oversized_length_prefix_is_rejected() {
        let mut bytes = (MAX_DEVICE_NAME_LEN as u64).to_le_bytes().to_vec();
        bytes.extend(std::iter::repeat(b'a').take(MAX_DEVICE_NAME_LEN));
        assert!(String::read_field(&mut Cursor::new(bytes)).is_none());
    }

    #[test]
    fn huge_length_prefix_does_not_allocate() {
        // A u64::MAX-length allocation would abort the process.
        let bytes = u64::MAX.to_le_bytes();
        assert!(String::read_field(&mut Cursor::new(bytes)).is_none());
        let err = validate_fingerprint(&mut Cursor::new(bytes), &fp()).unwrap_err();
        assert!(matches!(err, HeaderError::FieldMissing { field: fields::DEVICE_NAME }));
    }

    #[test]
    fn longest_storable_name_round_trips() {
        let name = "n".repeat(MAX_DEVICE_NAME_LEN - 1);
        let mut out = Vec::new();
        name.write_field(&mut out).unwrap();
        let back = String::read_field(&mut Cursor::new(out)).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn encoder_refuses_unreadable_name() {
        let f = Fingerprint { device_name: "n".repeat(MAX_DEVICE_NAME_LEN), ..fp() };
        let mut out = Vec::new();
        let err = write_fingerprint(&mut out, &f).unwrap_err();
        assert!(matches!(err, HeaderError::DeviceNameTooLong { len, .. } if len == MAX_DEVICE_NAME_LEN));
        assert!(out.is_empty(), "nothing may be written for a rejected header");
    }

    #[test]
    fn invalid_utf8_name_is_missing() {
        let mut bytes = 2u64.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0xC3, 0x28]);
        assert!(String::read_field(&mut Cursor::new(bytes)).is_none());
    }

    #[test]
    fn short_float_is_missing() {
        assert!(f32::read_field(&mut Cursor::new([0u8; 3])).is_none());
        assert!(Float3::read_field(&mut Cursor::new([0u8; 11])).is_none());
        assert!(Float3x3::read_field(&mut Cursor::new([0u8; 35])).is_none());
    }

// ## 5️⃣ Diagnostics

    #[test]
    fn error_messages_name_the_field() {
        let e = HeaderError::FieldMismatch { field: fields::SIZE };
        assert_eq!(e.to_string(), "header field does not match: size");
        let e = HeaderError::FieldMissing { field: fields::CENTER };
        assert_eq!(e.to_string(), "header field missing or truncated: center");
    }

// ## 6️⃣ Properties

    fn any_fingerprint() -> impl Strategy<Value = Fingerprint> {
        (
            "[A-Za-z0-9 _-]{0,64}",
            any::<[f32; 3]>(),
            any::<[f32; 3]>(),
            any::<[f32; 9]>(),
            any::<f32>(),
        )
            .prop_map(|(name, b, c, r, s)| {
                Fingerprint::new(name, Float3::from_array(b), Float3::from_array(c), Float3x3::from_row_major(r), s)
            })
    }

    proptest! {
        #[test]
        fn prop_header_round_trips_bit_exact(f in any_fingerprint()) {
            let bytes = encode_fingerprint(&f).unwrap();
            prop_assert_eq!(bytes.len(), f.encoded_len());
            let back = read_fingerprint(&mut Cursor::new(&bytes)).unwrap();
            prop_assert!(back.matches(&f));
            prop_assert!(validate_fingerprint(&mut Cursor::new(&bytes), &f).is_ok());
        }

        #[test]
        fn prop_different_size_never_validates(f in any_fingerprint(), delta in 1u32..1000) {
            let bytes = encode_fingerprint(&f).unwrap();
            let other = Fingerprint { size: f32::from_bits(f.size.to_bits().wrapping_add(delta)), ..f.clone() };
            prop_assert!(validate_fingerprint(&mut Cursor::new(&bytes), &other).is_err());
        }
    }
}
