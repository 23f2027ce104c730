//! Text decoder accepting the six textual shapes of a UUID.
//!
//! | Length | Shape                                           |
//! | ------ | ----------------------------------------------- |
//! | 32     | `6ba7b8109dad11d180b400c04fd430c8`              |
//! | 34     | `{6ba7b8109dad11d180b400c04fd430c8}`            |
//! | 36     | `6ba7b810-9dad-11d1-80b4-00c04fd430c8`          |
//! | 38     | `{6ba7b810-9dad-11d1-80b4-00c04fd430c8}`        |
//! | 41     | `urn:uuid:6ba7b8109dad11d180b400c04fd430c8`     |
//! | 45     | `urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8` |
//!
//! Hex digits are case-insensitive; the `urn:uuid:` prefix is not.

use std::str;

use crate::{Error, Uuid};

const URN_PREFIX: &[u8; 9] = b"urn:uuid:";

/// Offsets of the high nibble of each byte in the 8-4-4-4-12 form.
const CANONICAL_OFFSETS: [usize; 16] = [0, 2, 4, 6, 9, 11, 14, 16, 19, 21, 24, 26, 28, 30, 32, 34];

/// Offsets of the high nibble of each byte in the 32-digit form.
const HASH_OFFSETS: [usize; 16] = [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30];

impl Uuid {
    /// Parses any of the six accepted textual shapes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let a = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8")?;
    /// let b = Uuid::parse_str("urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8")?;
    /// let c = Uuid::parse_str("{6ba7b8109dad11d180b400c04fd430c8}")?;
    /// assert_eq!(a, b);
    /// assert_eq!(a, c);
    /// # Ok::<(), rfc_uuid::Error>(())
    /// ```
    pub fn parse_str(src: &str) -> Result<Self, Error> {
        Self::parse_ascii(src.as_bytes())
    }

    /// Parses any of the six accepted textual shapes from raw bytes.
    ///
    /// The input is only resliced, never copied or modified.
    pub fn parse_ascii(src: &[u8]) -> Result<Self, Error> {
        let body = match src.len() {
            32 | 36 => src,
            34 | 38 => {
                if src[0] != b'{' || src[src.len() - 1] != b'}' {
                    return Err(Error::IncorrectFormat(Error::fragment(src)));
                }
                &src[1..src.len() - 1]
            }
            41 | 45 => {
                let (prefix, rest) = src.split_at(URN_PREFIX.len());
                if prefix != URN_PREFIX {
                    return Err(Error::IncorrectFormat(Error::fragment(prefix)));
                }
                rest
            }
            len => {
                return Err(Error::IncorrectLength {
                    len,
                    input: Error::fragment(src),
                })
            }
        };

        if body.len() == 36 {
            if body[8] != b'-' || body[13] != b'-' || body[18] != b'-' || body[23] != b'-' {
                return Err(Error::IncorrectFormat(Error::fragment(body)));
            }
            decode_pairs(body, &CANONICAL_OFFSETS)
        } else {
            decode_pairs(body, &HASH_OFFSETS)
        }
    }

    /// Same as [`Uuid::parse_str`], but returns [`Uuid::NIL`] instead of an error.
    pub fn parse_or_nil(src: &str) -> Self {
        Self::parse_str(src).unwrap_or(Self::NIL)
    }
}

/// Decodes sixteen bytes, each from the two hex digits starting at the given offset.
fn decode_pairs(src: &[u8], offsets: &[usize; 16]) -> Result<Uuid, Error> {
    let mut dst = [0u8; 16];
    for (e, &x) in dst.iter_mut().zip(offsets) {
        let pair = &src[x..x + 2];
        match (hex_value(pair[0]), hex_value(pair[1])) {
            (Some(hi), Some(lo)) => *e = (hi << 4) | lo,
            _ => return Err(Error::InvalidFormat(Error::fragment(pair))),
        }
    }
    Ok(Uuid(dst))
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from any of the six accepted string representations.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_str(src)
    }
}

impl TryFrom<&str> for Uuid {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::parse_str(src)
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        Self::parse_str(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::hex_value;
    use crate::{Error, Uuid};
    use proptest::prelude::*;

    const DNS: [u8; 16] = [
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ];

    /// Returns all six shapes of the same value
    fn prepare_shapes() -> [&'static str; 6] {
        [
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "6ba7b8109dad11d180b400c04fd430c8",
            "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}",
            "{6ba7b8109dad11d180b400c04fd430c8}",
            "urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "urn:uuid:6ba7b8109dad11d180b400c04fd430c8",
        ]
    }

    /// Decodes all six shapes to identical bytes
    #[test]
    fn decodes_all_six_shapes_to_identical_bytes() {
        for text in prepare_shapes() {
            assert_eq!(Uuid::parse_str(text), Ok(Uuid::from(DNS)), "{}", text);
            assert_eq!(Uuid::parse_ascii(text.as_bytes()), Ok(Uuid::from(DNS)));
            let upper = text.to_uppercase().replace("URN:UUID:", "urn:uuid:");
            assert_eq!(upper.parse(), Ok(Uuid::from(DNS)));
            assert_eq!(Uuid::try_from(text), Ok(Uuid::from(DNS)));
            assert_eq!(Uuid::try_from(text.to_owned()), Ok(Uuid::from(DNS)));
            assert_eq!(
                Uuid::parse_str(text).unwrap().to_string(),
                "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
            );
        }
    }

    /// Returns error messages naming the offending input
    #[test]
    fn returns_error_messages_naming_the_offending_input() {
        let cases = [
            (
                "..................................",
                "uuid: incorrect UUID format in string \"..................................\"",
            ),
            (
                "123456789................................",
                "uuid: incorrect UUID format in string \"123456789\"",
            ),
            ("....", "uuid: incorrect UUID length 4 in string \"....\""),
            (
                "....................................",
                "uuid: incorrect UUID format in string \"....................................\"",
            ),
            (
                "xx00ae9e-dae3-459f-ad0e-6b574be3f950",
                "uuid: invalid UUID format in digits \"xx\"",
            ),
            (
                "................................",
                "uuid: invalid UUID format in digits \"..\"",
            ),
            (
                "xx00ae9edae3459fad0e6b574be3f950",
                "uuid: invalid UUID format in digits \"xx\"",
            ),
            (
                "{6ba7b810-9dad-11d1-80b4-00c04fd430cz}",
                "uuid: invalid UUID format in digits \"cz\"",
            ),
        ];

        for (text, message) in cases {
            let err = Uuid::parse_str(text).unwrap_err();
            assert_eq!(err.to_string(), message);
            assert_eq!(Uuid::parse_ascii(text.as_bytes()).unwrap_err(), err);
            assert_eq!(Uuid::parse_or_nil(text), Uuid::NIL);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f0-5b847438-ab50-f06991838802",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
            "[0180a8f0-5b84-7438-ab50-f06ac2e5e082]",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082)",
            "URN:UUID:0180a8f0-5b84-7438-ab50-f06ac2e5e082",
            "urn:uuid:0180a8f0+5b84-7438-ab50-f06ac2e5e082",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e0820}",
            "0180a8f05b847438ab50f06ac2e5e08z",
            "０180a8f0-5b84-7438-ab50-f06ac2e5e0",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err(), "{}", e);
        }
    }

    /// Rejects misplaced dashes with a format error
    #[test]
    fn rejects_misplaced_dashes_with_a_format_error() {
        let canonical = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
        for i in [8, 13, 18, 23] {
            let mut bytes = canonical.as_bytes().to_vec();
            bytes[i] = b'0';
            assert!(matches!(
                Uuid::parse_ascii(&bytes),
                Err(Error::IncorrectFormat(_))
            ));

            let mut wrapped = b"urn:uuid:".to_vec();
            wrapped.extend_from_slice(&bytes);
            assert!(matches!(
                Uuid::parse_ascii(&wrapped),
                Err(Error::IncorrectFormat(_))
            ));
        }
    }

    /// Does not modify the input buffer
    #[test]
    fn does_not_modify_the_input_buffer() {
        let src = b"{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}".to_vec();
        let copy = src.clone();
        assert!(Uuid::parse_ascii(&src).is_ok());
        assert_eq!(src, copy);
    }

    /// Decodes hexadecimal digits
    #[test]
    fn decodes_hexadecimal_digits() {
        for (i, c) in b"0123456789abcdef".iter().enumerate() {
            assert_eq!(hex_value(*c), Some(i as u8));
            assert_eq!(hex_value(c.to_ascii_uppercase()), Some(i as u8));
        }
        for c in [b'g', b'G', b'-', b' ', b'{', 0xff] {
            assert_eq!(hex_value(c), None);
        }
    }

    proptest! {
        /// Formats then parses back to the same value
        #[test]
        fn formats_then_parses_back_to_the_same_value(bytes in any::<[u8; 16]>()) {
            let e = Uuid::from(bytes);
            prop_assert_eq!(Uuid::parse_str(&e.to_string()), Ok(e));
            prop_assert_eq!(Uuid::parse_str(&e.encode_upper()), Ok(e));
            prop_assert_eq!(Uuid::parse_str(&e.encode_hex()), Ok(e));
            prop_assert_eq!(Uuid::parse_str(&format!("{{{}}}", e)), Ok(e));
            prop_assert_eq!(Uuid::parse_str(&format!("urn:uuid:{:x}", e)), Ok(e));
            prop_assert_eq!(Uuid::from_slice(&e.to_bytes()), Ok(e));
        }

        /// Fails with a length error outside the accepted lengths
        #[test]
        fn fails_with_a_length_error_outside_the_accepted_lengths(text in "[0-9a-f-]{0,64}") {
            prop_assume!(![32, 34, 36, 38, 41, 45].contains(&text.len()));
            let is_length_error = matches!(
                Uuid::parse_str(&text),
                Err(Error::IncorrectLength { len, .. }) if len == text.len()
            );
            prop_assert!(is_length_error);
        }
    }
}
