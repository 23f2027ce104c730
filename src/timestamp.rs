//! Timestamps embedded in time-ordered UUIDs.
//!
//! All three time-ordered versions are read into the same unit, the count of 100-nanosecond
//! intervals since 1582-10-15T00:00:00Z:
//!
//! | Version | Field layout                                        | Source unit           |
//! | ------- | --------------------------------------------------- | --------------------- |
//! | 1       | `time_low(32) | time_mid(16) | ver | time_hi(12)`   | 100ns since 1582      |
//! | 6       | `time_hi(32) | time_mid(16) | ver | time_low(12)`   | 100ns since 1582      |
//! | 7       | `unix_ts_ms(48) | ver | ...`                        | ms since 1970         |

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::{Error, Uuid, Version};

/// Number of 100ns intervals in one second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Number of 100ns intervals in one millisecond.
pub const TICKS_PER_MILLISECOND: u64 = 10_000;

/// Number of 100ns intervals between 1582-10-15 and 1970-01-01.
pub const GREGORIAN_TO_UNIX_TICKS: u64 = 122_192_928_000_000_000;

/// Number of seconds between 1582-10-15 and 1970-01-01.
const GREGORIAN_TO_UNIX_SECONDS: i64 = (GREGORIAN_TO_UNIX_TICKS / TICKS_PER_SECOND) as i64;

/// Count of 100-nanosecond intervals since 1582-10-15T00:00:00Z.
///
/// The field embedded in a version 1 or 6 UUID is 60 bits wide, so [`Timestamp::MAX_V1`]
/// (5236-03-31T21:21:00.6846975Z) is the latest instant those versions can carry. A version 7
/// timestamp, converted from unix milliseconds, may exceed it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The latest timestamp a version 1 or 6 UUID can carry.
    pub const MAX_V1: Self = Self((1 << 60) - 1);

    /// Creates a timestamp from 100ns ticks since 1582-10-15.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the 100ns ticks since 1582-10-15.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a timestamp from milliseconds since the unix epoch.
    pub const fn from_unix_millis(unix_ts_ms: u64) -> Self {
        Self(unix_ts_ms * TICKS_PER_MILLISECOND + GREGORIAN_TO_UNIX_TICKS)
    }

    /// Creates a timestamp from a calendar time, returning `None` for instants before
    /// 1582-10-15 or beyond the range of `u64` ticks.
    pub fn from_datetime(time: DateTime<Utc>) -> Option<Self> {
        let seconds = u64::try_from(time.timestamp().checked_add(GREGORIAN_TO_UNIX_SECONDS)?).ok()?;
        let sub_ticks = u64::from(time.timestamp_subsec_nanos() / 100);
        seconds
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(sub_ticks)
            .map(Self)
    }

    /// Converts the timestamp to calendar time.
    ///
    /// Exact to the tick over the whole `u64` range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Timestamp;
    ///
    /// let t = Timestamp::from_ticks(10_000_000).to_datetime();
    /// assert_eq!(t.to_rfc3339(), "1582-10-15T00:00:01+00:00");
    /// ```
    pub fn to_datetime(self) -> DateTime<Utc> {
        let seconds = (self.0 / TICKS_PER_SECOND) as i64 - GREGORIAN_TO_UNIX_SECONDS;
        let nanos = (self.0 % TICKS_PER_SECOND) as i64 * 100;
        DateTime::<Utc>::default() + Duration::seconds(seconds) + Duration::nanoseconds(nanos)
    }

    /// Extracts the timestamp from a version 1, 6 or 7 UUID, choosing the layout by the UUID's
    /// own version field.
    ///
    /// Other versions carry no timestamp and are reported as a mismatch against version 1.
    pub fn from_uuid(uuid: &Uuid) -> Result<Self, Error> {
        match uuid.get_version() {
            Some(Version::SortMac) => timestamp_from_v6(uuid),
            Some(Version::SortRand) => timestamp_from_v7(uuid),
            _ => timestamp_from_v1(uuid),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(src: Timestamp) -> Self {
        src.to_datetime()
    }
}

/// Converts 100ns ticks since 1582-10-15 to calendar time.
pub fn time_from_timestamp(ts: Timestamp) -> DateTime<Utc> {
    ts.to_datetime()
}

fn check_version(uuid: &Uuid, expected: Version) -> Result<(), Error> {
    if uuid.version() == expected.nibble() {
        Ok(())
    } else {
        Err(Error::VersionMismatch {
            uuid: *uuid,
            actual: uuid.version(),
            expected: expected.nibble(),
        })
    }
}

/// Returns the timestamp embedded in a version 1 UUID.
pub fn timestamp_from_v1(uuid: &Uuid) -> Result<Timestamp, Error> {
    check_version(uuid, Version::Mac)?;
    let b = uuid.as_bytes();
    let low = u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64;
    let mid = u16::from_be_bytes([b[4], b[5]]) as u64;
    let hi = (u16::from_be_bytes([b[6], b[7]]) & 0x0fff) as u64;
    Ok(Timestamp(low | (mid << 32) | (hi << 48)))
}

/// Returns the timestamp embedded in a version 6 UUID.
pub fn timestamp_from_v6(uuid: &Uuid) -> Result<Timestamp, Error> {
    check_version(uuid, Version::SortMac)?;
    let b = uuid.as_bytes();
    let hi = u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64;
    let mid = u16::from_be_bytes([b[4], b[5]]) as u64;
    let low = (u16::from_be_bytes([b[6], b[7]]) & 0x0fff) as u64;
    Ok(Timestamp((hi << 28) | (mid << 12) | low))
}

/// Returns the timestamp embedded in a version 7 UUID, re-based from unix milliseconds.
pub fn timestamp_from_v7(uuid: &Uuid) -> Result<Timestamp, Error> {
    check_version(uuid, Version::SortRand)?;
    let b = uuid.as_bytes();
    let unix_ts_ms = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
    Ok(Timestamp::from_unix_millis(unix_ts_ms))
}
