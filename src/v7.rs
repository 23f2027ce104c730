//! Version 7 layout and the millisecond/counter state that keeps it monotonic.

use tracing::debug;

use crate::{Error, Uuid, Version};

/// The largest 48-bit `unix_ts_ms`.
pub(crate) const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

const MAX_COUNTER: u64 = (1 << 42) - 1;

/// Rollback beyond this many milliseconds resets the state instead of reusing the previous
/// timestamp.
const ROLLBACK_ALLOWANCE: u64 = 10_000;

impl Uuid {
    /// Creates a version 7 UUID from field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument is out of the value range of the field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let uuid = Uuid::from_fields_v7(0x0123_4567_89ab, 0x0cde, 0x3f00_0000_0000_0042);
    /// assert_eq!(uuid.to_string(), "01234567-89ab-7cde-bf00-000000000042");
    /// ```
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms > MAX_TIMESTAMP || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self::from_bytes_with_version(
            [
                (unix_ts_ms >> 40) as u8,
                (unix_ts_ms >> 32) as u8,
                (unix_ts_ms >> 24) as u8,
                (unix_ts_ms >> 16) as u8,
                (unix_ts_ms >> 8) as u8,
                unix_ts_ms as u8,
                (rand_a >> 8) as u8,
                rand_a as u8,
                (rand_b >> 56) as u8,
                (rand_b >> 48) as u8,
                (rand_b >> 40) as u8,
                (rand_b >> 32) as u8,
                (rand_b >> 24) as u8,
                (rand_b >> 16) as u8,
                (rand_b >> 8) as u8,
                rand_b as u8,
            ],
            Version::SortRand,
        )
    }
}

/// Millisecond and 42-bit counter of the latest version 7 UUID.
///
/// The counter occupies `rand_a` and the top 30 bits of `rand_b`; the remaining 32 bits are
/// fresh randomness on every call.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct CounterState {
    timestamp: u64,
    counter: u64,
}

impl CounterState {
    pub(crate) const fn new() -> Self {
        Self {
            timestamp: 0,
            counter: 0,
        }
    }

    /// Produces the next UUID for `unix_ts_ms`, drawing random words from `next_u64`.
    ///
    /// Within the same millisecond, or after a rollback of up to ten seconds, the previous
    /// timestamp is reused and the counter incremented. Counter overflow at `MAX_TIMESTAMP`
    /// fails and leaves the state untouched.
    pub(crate) fn generate<F>(&mut self, unix_ts_ms: u64, mut next_u64: F) -> Result<Uuid, Error>
    where
        F: FnMut() -> Result<u64, Error>,
    {
        let unix_ts_ms = unix_ts_ms.min(MAX_TIMESTAMP);
        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.counter = next_u64()? & MAX_COUNTER;
        } else if unix_ts_ms + ROLLBACK_ALLOWANCE >= self.timestamp {
            if self.counter < MAX_COUNTER {
                self.counter += 1;
            } else if self.timestamp < MAX_TIMESTAMP {
                // increment timestamp at counter overflow
                self.timestamp += 1;
                self.counter = next_u64()? & MAX_COUNTER;
            } else {
                return Err(Error::ClockOverflow("version 7"));
            }
        } else {
            debug!(
                previous = self.timestamp,
                current = unix_ts_ms,
                "clock moved back beyond allowance, resetting v7 state"
            );
            self.timestamp = unix_ts_ms;
            self.counter = next_u64()? & MAX_COUNTER;
        }

        let tail = next_u64()? & 0xffff_ffff;
        Ok(Uuid::from_fields_v7(
            self.timestamp,
            (self.counter >> 30) as u16,
            ((self.counter & 0x3fff_ffff) << 32) | tail,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterState, MAX_COUNTER, MAX_TIMESTAMP};
    use crate::{timestamp, Error, Timestamp, Uuid};

    const N_SAMPLES: usize = 100_000;

    fn random_u64() -> Result<u64, Error> {
        Ok(rand::random())
    }

    /// Encodes prepared field values correctly
    #[test]
    fn encodes_prepared_field_values_correctly() {
        let cases = [
            ((0, 0, 0), "00000000-0000-7000-8000-000000000000"),
            (
                ((1 << 48) - 1, (1 << 12) - 1, (1 << 62) - 1),
                "ffffffff-ffff-7fff-bfff-ffffffffffff",
            ),
            (
                (0x018a_8fec_3ced, 0x0123, 0x0456_7890_abcd_ef01),
                "018a8fec-3ced-7123-8456-7890abcdef01",
            ),
        ];
        for ((ts, a, b), text) in cases {
            let e = Uuid::from_fields_v7(ts, a, b);
            assert_eq!(e.to_string(), text);
            assert_eq!(
                timestamp::timestamp_from_v7(&e),
                Ok(Timestamp::from_unix_millis(ts))
            );
        }
    }

    /// Panics on out-of-range rand_a
    #[test]
    #[should_panic(expected = "invalid field value")]
    fn panics_on_out_of_range_rand_a() {
        Uuid::from_fields_v7(0, 1 << 12, 0);
    }

    /// Generates increasing UUIDs even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_uuids_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89abu64;
        let mut g = CounterState::new();
        let mut prev = g.generate(ts, random_u64).unwrap();
        assert!(prev.to_string().starts_with("01234567-89ab-7"));
        for i in 0..N_SAMPLES as u64 {
            let curr = g.generate(ts - i.min(4_000), random_u64).unwrap();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.to_string().starts_with("01234567-89a"));
    }

    /// Resets state upon significant timestamp rollback
    #[test]
    fn resets_state_upon_significant_timestamp_rollback() {
        let ts = 0x0123_4567_89abu64;
        let mut g = CounterState::new();
        let prev = g.generate(ts, random_u64).unwrap();
        let curr = g.generate(ts - 10_001, random_u64).unwrap();
        assert!(prev > curr);
        assert_eq!(
            timestamp::timestamp_from_v7(&curr),
            Ok(Timestamp::from_unix_millis(ts - 10_001))
        );
    }

    /// Advances millisecond upon counter overflow
    #[test]
    fn advances_millisecond_upon_counter_overflow() {
        let ts = 0x0123_4567_89abu64;
        let mut g = CounterState::new();
        g.generate(ts, || Ok(MAX_COUNTER)).unwrap();
        let e = g.generate(ts, || Ok(0)).unwrap();
        assert_eq!(e.to_string(), "01234567-89ac-7000-8000-000000000000");
    }

    /// Fails instead of wrapping when counter overflows at the last millisecond
    #[test]
    fn fails_instead_of_wrapping_when_counter_overflows_at_the_last_millisecond() {
        let mut g = CounterState::new();
        let a = g.generate(MAX_TIMESTAMP + 5, || Ok(MAX_COUNTER - 1)).unwrap();
        let b = g.generate(MAX_TIMESTAMP, || Ok(0)).unwrap();
        assert!(a < b);
        assert_eq!(b.to_string(), "ffffffff-ffff-7fff-bfff-ffff00000000");

        let overflow = Err(Error::ClockOverflow("version 7"));
        assert_eq!(g.generate(MAX_TIMESTAMP, random_u64), overflow);
        assert_eq!(g.generate(MAX_TIMESTAMP, random_u64), overflow);

        // rollback beyond the allowance resets the state
        let c = g.generate(MAX_TIMESTAMP - 10_001, random_u64).unwrap();
        assert_eq!(
            timestamp::timestamp_from_v7(&c),
            Ok(Timestamp::from_unix_millis(MAX_TIMESTAMP - 10_001))
        );
    }

    /// Re-randomizes counter when millisecond advances
    #[test]
    fn re_randomizes_counter_when_millisecond_advances() {
        let mut g = CounterState::new();
        let a = g.generate(1_000, || Ok(0)).unwrap();
        let b = g.generate(1_000, || Ok(0)).unwrap();
        let c = g.generate(1_001, || Ok(u64::MAX)).unwrap();
        assert_eq!(a.to_string(), "00000000-03e8-7000-8000-000000000000");
        assert_eq!(b.to_string(), "00000000-03e8-7000-8000-000100000000");
        assert_eq!(c.to_string(), "00000000-03e9-7fff-bfff-ffffffffffff");
    }

    /// Propagates random source failure
    #[test]
    fn propagates_random_source_failure() {
        let mut g = CounterState::new();
        let err = Error::RandomSource("exhausted".into());
        assert_eq!(g.generate(1, || Err(err.clone())), Err(err));
    }
}
