//! Thread-safe generator of time-ordered, random and name-based UUIDs.

use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::v1::{MAX_CLOCK_SEQ, MAX_TICKS};
use crate::v7::CounterState;
use crate::{Error, Timestamp, Uuid};

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd"
))]
use crate::v1::Domain;

mod sources;
pub use sources::{Clock, HwAddrSource, InterfaceHwAddr, OsRandom, RandSource, SystemClock};


/// A trait that abstracts UUID generation so call sites can take any generator.
pub trait UuidGenerator {
    /// Generates a version 1 UUID from the current time and the node identifier.
    fn new_v1(&self) -> Result<Uuid, Error>;

    /// Generates a version 3 UUID from the MD5 digest of `namespace` and `name`.
    fn new_v3(&self, namespace: &Uuid, name: &str) -> Uuid;

    /// Generates a random version 4 UUID.
    fn new_v4(&self) -> Result<Uuid, Error>;

    /// Generates a version 5 UUID from the SHA-1 digest of `namespace` and `name`.
    fn new_v5(&self, namespace: &Uuid, name: &str) -> Uuid;

    /// Generates a version 6 UUID from the current time.
    fn new_v6(&self) -> Result<Uuid, Error>;

    /// Generates a version 7 UUID from the current time.
    fn new_v7(&self) -> Result<Uuid, Error>;
}

/// Represents a UUID generator that owns the clock sequence, the latest timestamps and the
/// cached node identifier.
///
/// One instance is meant to be created by the application and shared by reference; all methods
/// take `&self` and are safe to call from many threads at once. Calls producing time-ordered
/// UUIDs are serialized by one internal lock, so a single instance never emits the same
/// `(timestamp, clock sequence)` pair twice.
///
/// # Examples
///
/// ```rust
/// use std::thread;
/// use rfc_uuid::Generator;
///
/// let g = Generator::builder()
///     .hw_addr_source(|| -> Result<[u8; 6], rfc_uuid::Error> { Ok([0x02, 0, 0, 0, 0, 1]) })
///     .build();
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.new_v1().unwrap(), i);
///             }
///         });
///     }
/// });
/// ```
pub struct Generator {
    clock: Box<dyn Clock>,
    rand: Box<dyn RandSource>,
    hw_addr: Box<dyn HwAddrSource>,

    /// Outcome of the one and only node resolution.
    node: OnceLock<Result<[u8; 6], Error>>,

    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    last_ticks: u64,
    clock_seq: Option<u16>,
    /// Clock sequence of the first pair issued at `MAX_TICKS`.
    ceiling_seq: Option<u16>,
    v7: CounterState,
}

impl Generator {
    /// Creates a generator with the system clock, the operating system's random source and the
    /// first network interface address.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder to replace any of the default sources.
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Creates a generator that takes its node identifier from `source` and uses the default
    /// clock and random source.
    pub fn with_hw_addr_source(source: impl HwAddrSource + 'static) -> Self {
        Self::builder().hw_addr_source(source).build()
    }

    /// Generates a version 1 UUID from the current time.
    ///
    /// Fails with [`Error::NoHardwareAddress`] if no node identifier can be resolved.
    pub fn new_v1(&self) -> Result<Uuid, Error> {
        self.new_v1_at(self.clock.now())
    }

    /// Generates a version 1 UUID as if the clock read `time`.
    ///
    /// Times before 1582-10-15 are treated as the epoch itself. The result still goes through the
    /// clock sequence state and therefore never repeats an earlier value of this generator.
    ///
    /// Once the 60-bit tick field is exhausted, only the clock sequence varies; after every
    /// sequence value has been used at the last tick, this fails with [`Error::ClockOverflow`].
    pub fn new_v1_at(&self, time: DateTime<Utc>) -> Result<Uuid, Error> {
        let node = self.node()?;
        let (ticks, clock_seq) = self.next_clock_fields(to_ticks(time))?;
        Ok(Uuid::from_fields_v1(ticks, clock_seq, &node))
    }

    /// Generates a version 2 (DCE Security) UUID for the current user, group or organization.
    ///
    /// The time-low field carries the POSIX UID for [`Domain::Person`] and the GID for
    /// [`Domain::Group`]; [`Domain::Org`] keeps the time-low bits.
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "freebsd"
    ))]
    pub fn new_v2(&self, domain: Domain) -> Result<Uuid, Error> {
        use nix::unistd::{getgid, getuid};

        let local_id = match domain {
            Domain::Person => Some(getuid().as_raw()),
            Domain::Group => Some(getgid().as_raw()),
            Domain::Org => None,
        };
        Ok(self.new_v1()?.into_v2(domain, local_id))
    }

    /// Same as [`Uuid::new_v3`].
    pub fn new_v3(&self, namespace: &Uuid, name: &str) -> Uuid {
        Uuid::new_v3(namespace, name)
    }

    /// Generates a random version 4 UUID from this generator's random source.
    pub fn new_v4(&self) -> Result<Uuid, Error> {
        let mut bytes = [0u8; 16];
        self.rand.fill(&mut bytes)?;
        Ok(Uuid::from_random_bytes(bytes))
    }

    /// Same as [`Uuid::new_v5`].
    pub fn new_v5(&self, namespace: &Uuid, name: &str) -> Uuid {
        Uuid::new_v5(namespace, name)
    }

    /// Generates a version 6 UUID from the current time.
    ///
    /// Shares the clock sequence state with version 1, but draws the node bytes from the
    /// random source, so no hardware address is needed.
    pub fn new_v6(&self) -> Result<Uuid, Error> {
        self.new_v6_at(self.clock.now())
    }

    /// Generates a version 6 UUID as if the clock read `time`.
    pub fn new_v6_at(&self, time: DateTime<Utc>) -> Result<Uuid, Error> {
        let mut node = [0u8; 6];
        self.rand.fill(&mut node)?;
        let (ticks, clock_seq) = self.next_clock_fields(to_ticks(time))?;
        Ok(Uuid::from_fields_v6(ticks, clock_seq, &node))
    }

    /// Generates a version 7 UUID from the current time.
    ///
    /// UUIDs from one generator increase monotonically unless the clock moves back more than ten
    /// seconds, in which case the millisecond/counter state is reset.
    pub fn new_v7(&self) -> Result<Uuid, Error> {
        self.new_v7_at(self.clock.now())
    }

    /// Generates a version 7 UUID as if the clock read `time`.
    ///
    /// Times before the unix epoch are treated as the epoch itself. Fails with
    /// [`Error::ClockOverflow`] once the counter overflows at the last 48-bit millisecond.
    pub fn new_v7_at(&self, time: DateTime<Utc>) -> Result<Uuid, Error> {
        let unix_ts_ms = u64::try_from(time.timestamp_millis()).unwrap_or(0);
        let mut state = self.lock_state();
        state.v7.generate(unix_ts_ms, || self.random_u64())
    }

    /// Returns the cached node identifier, resolving it on first use.
    fn node(&self) -> Result<[u8; 6], Error> {
        self.node
            .get_or_init(|| match self.hw_addr.hardware_addr() {
                Ok(addr) => {
                    debug!(node = %NodeDisplay(&addr), "resolved node identifier");
                    Ok(addr)
                }
                Err(err) => {
                    warn!(%err, "node identifier unavailable, versions 1 and 2 disabled");
                    Err(Error::NoHardwareAddress)
                }
            })
            .clone()
    }

    /// Advances the clock sequence state for `ticks` and returns the pair to embed.
    fn next_clock_fields(&self, ticks: u64) -> Result<(u64, u16), Error> {
        let mut state = self.lock_state();
        let mut clock_seq = match state.clock_seq {
            Some(seq) => seq,
            None => self.random_u16()? & MAX_CLOCK_SEQ,
        };

        if ticks > state.last_ticks {
            let step = self.random_u16()? % MAX_CLOCK_SEQ + 1;
            clock_seq = (clock_seq + step) & MAX_CLOCK_SEQ;
            state.last_ticks = ticks;
        } else {
            trace!(
                ticks,
                last_ticks = state.last_ticks,
                "clock did not advance, clamping to previous tick"
            );
            if state.last_ticks < MAX_TICKS {
                state.last_ticks += 1;
            } else {
                // tick field exhausted
                clock_seq = (clock_seq + 1) & MAX_CLOCK_SEQ;
                if state.ceiling_seq == Some(clock_seq) {
                    warn!("clock sequence exhausted at the last representable tick");
                    return Err(Error::ClockOverflow("version 1 and 6"));
                }
            }
        }

        if state.last_ticks == MAX_TICKS && state.ceiling_seq.is_none() {
            state.ceiling_seq = Some(clock_seq);
        }
        state.clock_seq = Some(clock_seq);
        Ok((state.last_ticks, clock_seq))
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        // the state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn random_u16(&self) -> Result<u16, Error> {
        let mut buf = [0u8; 2];
        self.rand.fill(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn random_u64(&self) -> Result<u64, Error> {
        let mut buf = [0u8; 8];
        self.rand.fill(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("node", &self.node.get())
            .finish_non_exhaustive()
    }
}

impl UuidGenerator for Generator {
    fn new_v1(&self) -> Result<Uuid, Error> {
        Generator::new_v1(self)
    }

    fn new_v3(&self, namespace: &Uuid, name: &str) -> Uuid {
        Generator::new_v3(self, namespace, name)
    }

    fn new_v4(&self) -> Result<Uuid, Error> {
        Generator::new_v4(self)
    }

    fn new_v5(&self, namespace: &Uuid, name: &str) -> Uuid {
        Generator::new_v5(self, namespace, name)
    }

    fn new_v6(&self) -> Result<Uuid, Error> {
        Generator::new_v6(self)
    }

    fn new_v7(&self) -> Result<Uuid, Error> {
        Generator::new_v7(self)
    }
}

/// Builds a [`Generator`] with custom sources.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rfc_uuid::{Error, Generator, Timestamp};
///
/// let g = Generator::builder()
///     .clock(|| Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
///     .hw_addr_source(|| -> Result<[u8; 6], Error> { Ok([0x02, 0, 0, 0, 0, 1]) })
///     .build();
/// let a = g.new_v1()?;
/// let b = g.new_v1()?;
/// assert!(Timestamp::from_uuid(&a)? < Timestamp::from_uuid(&b)?);
/// # Ok::<(), Error>(())
/// ```
#[derive(Default)]
pub struct GeneratorBuilder {
    clock: Option<Box<dyn Clock>>,
    rand: Option<Box<dyn RandSource>>,
    hw_addr: Option<Box<dyn HwAddrSource>>,
}

impl GeneratorBuilder {
    /// Creates a builder with every source left at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the wall clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Replaces the random source used for versions 4, 6 and 7 and for the clock sequence.
    pub fn rand_source(mut self, rand: impl RandSource + 'static) -> Self {
        self.rand = Some(Box::new(rand));
        self
    }

    /// Replaces the node identifier source of versions 1 and 2.
    pub fn hw_addr_source(mut self, hw_addr: impl HwAddrSource + 'static) -> Self {
        self.hw_addr = Some(Box::new(hw_addr));
        self
    }

    /// Creates the generator.
    pub fn build(self) -> Generator {
        Generator {
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            rand: self.rand.unwrap_or_else(|| Box::new(OsRandom)),
            hw_addr: self.hw_addr.unwrap_or_else(|| Box::new(InterfaceHwAddr)),
            node: OnceLock::new(),
            state: Mutex::new(State {
                last_ticks: 0,
                clock_seq: None,
                ceiling_seq: None,
                v7: CounterState::new(),
            }),
        }
    }
}

impl fmt::Debug for GeneratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorBuilder")
            .field("clock", &self.clock.is_some())
            .field("rand_source", &self.rand.is_some())
            .field("hw_addr_source", &self.hw_addr.is_some())
            .finish()
    }
}

/// Clamps a calendar time into the 60-bit tick range.
fn to_ticks(time: DateTime<Utc>) -> u64 {
    match Timestamp::from_datetime(time) {
        Some(ts) => ts.ticks().min(MAX_TICKS),
        None if time.timestamp() < 0 => 0,
        None => MAX_TICKS,
    }
}

/// Formats a node identifier as colon-separated hex.
struct NodeDisplay<'a>(&'a [u8; 6]);

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
