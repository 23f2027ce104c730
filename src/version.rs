/// The version field, i.e. the high nibble of byte 6, naming the generation algorithm.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
#[non_exhaustive]
pub enum Version {
    /// Nil UUID sentinel.
    Nil = 0,
    /// Gregorian time and node identifier.
    Mac = 1,
    /// DCE Security, time and POSIX UID/GID.
    Dce = 2,
    /// Name-based, MD5.
    Md5 = 3,
    /// Random.
    Random = 4,
    /// Name-based, SHA-1.
    Sha1 = 5,
    /// Reordered (sortable) Gregorian time.
    SortMac = 6,
    /// Unix millisecond time.
    SortRand = 7,
    /// Vendor-specific layout.
    Custom = 8,
    /// Max UUID sentinel.
    Max = 0x0f,
}

impl Version {
    /// Returns the version matching the nibble value, if it names one.
    pub const fn from_nibble(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Nil),
            1 => Some(Self::Mac),
            2 => Some(Self::Dce),
            3 => Some(Self::Md5),
            4 => Some(Self::Random),
            5 => Some(Self::Sha1),
            6 => Some(Self::SortMac),
            7 => Some(Self::SortRand),
            8 => Some(Self::Custom),
            0x0f => Some(Self::Max),
            _ => None,
        }
    }

    /// Returns the nibble value.
    pub const fn nibble(self) -> u8 {
        self as u8
    }
}

/// The variant field, i.e. the top one to three bits of byte 8, naming the layout family.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// `0xx`: reserved, NCS backward compatibility.
    Ncs,
    /// `10x`: the layout specified by RFC 4122 and RFC 9562.
    Rfc4122,
    /// `110`: reserved, Microsoft backward compatibility.
    Microsoft,
    /// `111`: reserved for future definition.
    Future,
}

impl Variant {
    /// Classifies the variant of a clock-seq-hi-and-reserved byte.
    pub const fn from_byte(b: u8) -> Self {
        match b >> 5 {
            0b000..=0b011 => Self::Ncs,
            0b100 | 0b101 => Self::Rfc4122,
            0b110 => Self::Microsoft,
            _ => Self::Future,
        }
    }

    /// Returns `b` with the bits owned by this variant overwritten and the remaining payload
    /// bits preserved.
    pub const fn apply(self, b: u8) -> u8 {
        match self {
            Self::Ncs => b & 0x7f,
            Self::Rfc4122 => (b & 0x3f) | 0x80,
            Self::Microsoft => (b & 0x1f) | 0xc0,
            Self::Future => b | 0xe0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Variant, Version};

    /// Classifies variant bit patterns
    #[test]
    fn classifies_variant_bit_patterns() {
        for b in 0x00..=0x7f {
            assert_eq!(Variant::from_byte(b), Variant::Ncs);
        }
        for b in 0x80..=0xbf {
            assert_eq!(Variant::from_byte(b), Variant::Rfc4122);
        }
        for b in 0xc0..=0xdf {
            assert_eq!(Variant::from_byte(b), Variant::Microsoft);
        }
        for b in 0xe0..=0xff {
            assert_eq!(Variant::from_byte(b), Variant::Future);
        }
    }

    /// Applies only the bits owned by each variant
    #[test]
    fn applies_only_the_bits_owned_by_each_variant() {
        let variants = [
            Variant::Ncs,
            Variant::Rfc4122,
            Variant::Microsoft,
            Variant::Future,
        ];
        for b in 0..=0xffu8 {
            for v in variants {
                assert_eq!(Variant::from_byte(v.apply(b)), v);
            }
            assert_eq!(Variant::Ncs.apply(b) & 0x7f, b & 0x7f);
            assert_eq!(Variant::Rfc4122.apply(b) & 0x3f, b & 0x3f);
            assert_eq!(Variant::Microsoft.apply(b) & 0x1f, b & 0x1f);
            assert_eq!(Variant::Future.apply(b) & 0x1f, b & 0x1f);
        }
    }

    /// Maps nibbles to versions
    #[test]
    fn maps_nibbles_to_versions() {
        for n in 0..=8u8 {
            assert_eq!(Version::from_nibble(n).map(Version::nibble), Some(n));
        }
        for n in 9..=14u8 {
            assert_eq!(Version::from_nibble(n), None);
        }
        assert_eq!(Version::from_nibble(15), Some(Version::Max));
    }
}
