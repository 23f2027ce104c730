//! Field layouts of the Gregorian-time versions 1, 2 and 6.

use crate::{Uuid, Version};

/// The largest 60-bit tick count.
pub(crate) const MAX_TICKS: u64 = (1 << 60) - 1;

/// The largest 14-bit clock sequence.
pub(crate) const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// DCE Security domain of a version 2 UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Domain {
    /// POSIX UID domain.
    Person = 0,
    /// POSIX GID domain.
    Group = 1,
    /// Organization domain.
    Org = 2,
}

impl Uuid {
    /// Creates a version 1 UUID from a 60-bit tick count, a 14-bit clock sequence and a node
    /// identifier.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` or `clock_seq` does not fit in its field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let uuid = Uuid::from_fields_v1(137_538_640_775_418_750, 0x18d0, &[0x52, 0x92, 0x69, 0xfb, 0x14, 0x59]);
    /// assert_eq!(uuid.to_string(), "424f137e-a2aa-11e8-98d0-529269fb1459");
    /// ```
    pub const fn from_fields_v1(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        if ticks > MAX_TICKS || clock_seq > MAX_CLOCK_SEQ {
            panic!("invalid field value");
        }

        Self::from_bytes_with_version(
            [
                (ticks >> 24) as u8,
                (ticks >> 16) as u8,
                (ticks >> 8) as u8,
                ticks as u8,
                (ticks >> 40) as u8,
                (ticks >> 32) as u8,
                (ticks >> 56) as u8,
                (ticks >> 48) as u8,
                (clock_seq >> 8) as u8,
                clock_seq as u8,
                node[0],
                node[1],
                node[2],
                node[3],
                node[4],
                node[5],
            ],
            Version::Mac,
        )
    }

    /// Creates a version 6 UUID, i.e. a version 1 UUID with the timestamp fields reordered
    /// from most to least significant.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` or `clock_seq` does not fit in its field.
    pub const fn from_fields_v6(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        if ticks > MAX_TICKS || clock_seq > MAX_CLOCK_SEQ {
            panic!("invalid field value");
        }

        Self::from_bytes_with_version(
            [
                (ticks >> 52) as u8,
                (ticks >> 44) as u8,
                (ticks >> 36) as u8,
                (ticks >> 28) as u8,
                (ticks >> 20) as u8,
                (ticks >> 12) as u8,
                (ticks >> 8) as u8 & 0x0f,
                ticks as u8,
                (clock_seq >> 8) as u8,
                clock_seq as u8,
                node[0],
                node[1],
                node[2],
                node[3],
                node[4],
                node[5],
            ],
            Version::SortMac,
        )
    }

    /// Turns a version 1 UUID into a version 2 UUID carrying `local_id` in the time-low field
    /// and `domain` in the clock-seq-low byte.
    pub(crate) fn into_v2(self, domain: Domain, local_id: Option<u32>) -> Self {
        let mut bytes = self.0;
        if let Some(id) = local_id {
            bytes[..4].copy_from_slice(&id.to_be_bytes());
        }
        bytes[9] = domain as u8;
        Self::from_bytes_with_version(bytes, Version::Dce)
    }
}
