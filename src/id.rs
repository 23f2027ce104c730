use std::fmt;

use fstr::FStr;

use crate::{Error, Variant, Version};

/// Size of a UUID in bytes.
pub const SIZE: usize = 16;

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Represents a Universally Unique IDentifier.
///
/// The 16 bytes are stored in RFC 4122 field order: time-low, time-mid, time-hi-and-version,
/// clock-seq-hi-and-reserved, clock-seq-low and node. Equality and ordering are byte-wise.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid(pub(crate) [u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates a UUID from its 16-byte big-endian representation.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a UUID from a byte slice that must be exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{Error, Uuid};
    ///
    /// let bytes = [0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1,
    ///              0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8];
    /// let uuid = Uuid::from_slice(&bytes)?;
    /// assert_eq!(uuid.to_string(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    ///
    /// assert_eq!(Uuid::from_slice(&bytes[1..]), Err(Error::IncorrectByteLength(15)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::IncorrectByteLength(src.len()))
    }

    /// Same as [`Uuid::from_slice`], but returns [`Uuid::NIL`] instead of an error.
    pub fn from_slice_or_nil(src: &[u8]) -> Self {
        Self::from_slice(src).unwrap_or(Self::NIL)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// Returns true if this is the Nil UUID.
    pub const fn is_nil(&self) -> bool {
        u128::from_be_bytes(self.0) == 0
    }

    /// Returns true if this is the Max UUID.
    pub const fn is_max(&self) -> bool {
        u128::from_be_bytes(self.0) == u128::MAX
    }

    /// Returns the raw value of the version field, i.e. the high nibble of byte 6.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the version field as a [`Version`], if the nibble names one.
    pub const fn get_version(&self) -> Option<Version> {
        Version::from_nibble(self.version())
    }

    /// Returns the variant encoded in the top bits of byte 8.
    pub const fn variant(&self) -> Variant {
        Variant::from_byte(self.0[8])
    }

    /// Overwrites the version field.
    pub fn set_version(&mut self, version: Version) {
        self.0[6] = (self.0[6] & 0x0f) | (version.nibble() << 4);
    }

    /// Overwrites the bits owned by `variant` in byte 8, preserving the remaining payload bits.
    pub fn set_variant(&mut self, variant: Variant) {
        self.0[8] = variant.apply(self.0[8]);
    }

    /// Stamps `version` and the RFC 4122 variant onto raw bytes.
    pub(crate) const fn from_bytes_with_version(mut bytes: [u8; 16], version: Version) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | (version.nibble() << 4);
        bytes[8] = Variant::Rfc4122.apply(bytes[8]);
        Self(bytes)
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal string representation in a stack-allocated
    /// [`FStr`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let x = "{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}".parse::<Uuid>()?;
    /// assert_eq!(&x.encode() as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(&x.encode_upper() as &str, "6BA7B810-9DAD-11D1-80B4-00C04FD430C8");
    /// assert_eq!(&x.encode_hex() as &str, "6ba7b8109dad11d180b400c04fd430c8");
    /// assert_eq!(x.quoted(), "\"6ba7b810-9dad-11d1-80b4-00c04fd430c8\"");
    /// # Ok::<(), rfc_uuid::Error>(())
    /// ```
    pub const fn encode(&self) -> FStr<36> {
        let buffer = self.hyphenated(LOWER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 8-4-4-4-12 uppercase hexadecimal string representation.
    pub const fn encode_upper(&self) -> FStr<36> {
        let buffer = self.hyphenated(UPPER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 32-digit lowercase hexadecimal string representation without dashes.
    pub const fn encode_hex(&self) -> FStr<32> {
        let buffer = self.simple(LOWER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 32-digit uppercase hexadecimal string representation without dashes.
    pub const fn encode_hex_upper(&self) -> FStr<32> {
        let buffer = self.simple(UPPER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the canonical string representation wrapped in double quotes.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.encode())
    }

    const fn hyphenated(&self, digits: &[u8; 16]) -> [u8; 36] {
        let mut buffer = [b'-'; 36];
        let (mut i, mut j) = (0, 0);
        while i < 16 {
            let e = self.0[i] as usize;
            buffer[j] = digits[e >> 4];
            buffer[j + 1] = digits[e & 15];
            j += if i == 3 || i == 5 || i == 7 || i == 9 { 3 } else { 2 };
            i += 1;
        }
        buffer
    }

    const fn simple(&self, digits: &[u8; 16]) -> [u8; 32] {
        let mut buffer = [0u8; 32];
        let mut i = 0;
        while i < 16 {
            let e = self.0[i] as usize;
            buffer[i * 2] = digits[e >> 4];
            buffer[i * 2 + 1] = digits[e & 15];
            i += 1;
        }
        buffer
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::LowerHex for Uuid {
    /// Returns the 32-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex())
    }
}

impl fmt::UpperHex for Uuid {
    /// Returns the 32-digit uppercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex_upper())
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl From<Uuid> for Vec<u8> {
    fn from(src: Uuid) -> Self {
        src.0.to_vec()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Uuid;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid::parse_str(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::Uuid;
    use crate::{Error, Variant, Version};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [([u8; 16], &'static str)] {
        &[
            ([0x00; 16], "00000000-0000-0000-0000-000000000000"),
            ([0xff; 16], "ffffffff-ffff-ffff-ffff-ffffffffffff"),
            (
                [
                    0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f,
                    0xd4, 0x30, 0xc8,
                ],
                "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            ),
            (
                [
                    0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x12, 0x34, 0x56, 0x78, 0x90,
                    0xab, 0xcd, 0xef,
                ],
                "12345678-90ab-cdef-1234-567890abcdef",
            ),
            (
                [
                    1, 128, 174, 89, 7, 140, 123, 128, 177, 19, 47, 225, 74, 97, 95, 179,
                ],
                "0180ae59-078c-7b80-b113-2fe14a615fb3",
            ),
        ]
    }

    /// Encodes prepared cases correctly
    #[test]
    fn encodes_prepared_cases_correctly() {
        for (bytes, text) in prepare_cases() {
            let e = Uuid::from_bytes(*bytes);
            assert_eq!(&e.encode() as &str, *text);
            assert_eq!(&e.to_string(), text);
            assert_eq!(&e.encode_upper() as &str, text.to_uppercase());
            assert_eq!(&e.encode_hex() as &str, text.replace('-', ""));
            assert_eq!(
                &e.encode_hex_upper() as &str,
                text.replace('-', "").to_uppercase()
            );
            assert_eq!(format!("{:x}", e), text.replace('-', ""));
            assert_eq!(format!("{:X}", e), text.replace('-', "").to_uppercase());
            assert_eq!(e.quoted(), format!("\"{}\"", text));
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(e).to_string(), text);
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert!(Uuid::NIL.is_nil());
        assert!(!Uuid::NIL.is_max());
        assert!(Uuid::MAX.is_max());
        assert!(Uuid::default().is_nil());
        assert_eq!(Uuid::NIL.get_version(), Some(Version::Nil));
        assert_eq!(Uuid::MAX.get_version(), Some(Version::Max));
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (bytes, _) in prepare_cases() {
            let e = Uuid::from_bytes(*bytes);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(Uuid::from_slice(&e.to_bytes()), Ok(e));
            assert_eq!(Uuid::try_from(Vec::from(e).as_slice()), Ok(e));
            assert_eq!(Uuid::from_slice(e.as_ref()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
        }
    }

    /// Returns a copy from to_bytes
    #[test]
    fn returns_a_copy_from_to_bytes() {
        let e = Uuid::MAX;
        let mut bytes = e.to_bytes();
        bytes[0] = 0;
        assert_eq!(e, Uuid::MAX);
    }

    /// Rejects slices of wrong length
    #[test]
    fn rejects_slices_of_wrong_length() {
        for len in [0, 1, 15, 17, 33] {
            let src = vec![0xaa; len];
            assert_eq!(Uuid::from_slice(&src), Err(Error::IncorrectByteLength(len)));
            assert_eq!(Uuid::from_slice_or_nil(&src), Uuid::NIL);
        }
        assert_eq!(Uuid::from_slice_or_nil(&[0xaa; 16]), Uuid::from([0xaa; 16]));
    }

    /// Reads the version nibble
    #[test]
    fn reads_the_version_nibble() {
        let mut bytes = [0u8; 16];
        bytes[6] = 0x10;
        assert_eq!(Uuid::from(bytes).version(), 1);
        assert_eq!(Uuid::from(bytes).get_version(), Some(Version::Mac));
        bytes[6] = 0xa5;
        assert_eq!(Uuid::from(bytes).version(), 10);
        assert_eq!(Uuid::from(bytes).get_version(), None);
    }

    /// Classifies all four variants
    #[test]
    fn classifies_all_four_variants() {
        let cases = [
            (0x00, Variant::Ncs),
            (0x80, Variant::Rfc4122),
            (0xc0, Variant::Microsoft),
            (0xe0, Variant::Future),
        ];
        for (b, want) in cases {
            let mut bytes = [0u8; 16];
            bytes[8] = b;
            assert_eq!(Uuid::from(bytes).variant(), want);
        }
    }

    /// Sets version and variant in place
    #[test]
    fn sets_version_and_variant_in_place() {
        let mut e = Uuid::NIL;
        e.set_version(Version::Random);
        assert_eq!(e.version(), 4);
        assert_eq!(e.get_version(), Some(Version::Random));

        for want in [
            Variant::Ncs,
            Variant::Rfc4122,
            Variant::Microsoft,
            Variant::Future,
        ] {
            let mut e = Uuid::NIL;
            e.set_variant(want);
            assert_eq!(e.variant(), want);
        }

        let mut e = Uuid::MAX;
        e.set_variant(Variant::Rfc4122);
        assert_eq!(e.as_bytes()[8], 0xbf);
        e.set_version(Version::Mac);
        assert_eq!(e.as_bytes()[6], 0x1f);
        assert_eq!(e.as_bytes()[..6], [0xff; 6]);
    }
}
