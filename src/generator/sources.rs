//! Pluggable time, randomness and node identifier sources for [`Generator`].
//!
//! Each trait is implemented for plain closures, so tests and callers can substitute fixed or
//! counting sources without declaring a type.
//!
//! [`Generator`]: super::Generator

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};

use crate::Error;

/// A trait that defines the wall clock interface for [`Generator`](super::Generator).
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// A trait that defines the entropy interface for [`Generator`](super::Generator).
///
/// Implementations are shared across threads and must be safe to call concurrently.
pub trait RandSource: Send + Sync {
    /// Fills `dest` with random data.
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error>;
}

impl<F> RandSource for F
where
    F: Fn(&mut [u8]) -> Result<(), Error> + Send + Sync,
{
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        self(dest)
    }
}

/// A trait that defines how [`Generator`](super::Generator) obtains the 6-byte node
/// identifier of version 1 and 2 UUIDs.
///
/// The generator calls it at most once.
pub trait HwAddrSource: Send + Sync {
    /// Returns a hardware address, or [`Error::NoHardwareAddress`].
    fn hardware_addr(&self) -> Result<[u8; 6], Error>;
}

impl<F> HwAddrSource for F
where
    F: Fn() -> Result<[u8; 6], Error> + Send + Sync,
{
    fn hardware_addr(&self) -> Result<[u8; 6], Error> {
        self()
    }
}

/// The system wall clock.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The operating system's cryptographically secure random number generator.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}

/// The link-layer address of the first non-loopback network interface that has a non-zero
/// 6-byte address.
///
/// Platforms without interface enumeration always report [`Error::NoHardwareAddress`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct InterfaceHwAddr;

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd"
))]
impl HwAddrSource for InterfaceHwAddr {
    fn hardware_addr(&self) -> Result<[u8; 6], Error> {
        use nix::ifaddrs::getifaddrs;
        use nix::net::if_::InterfaceFlags;

        let interfaces = getifaddrs().map_err(|err| {
            tracing::debug!(%err, "failed to list network interfaces");
            Error::NoHardwareAddress
        })?;
        interfaces
            .filter(|ifa| !ifa.flags.contains(InterfaceFlags::IFF_LOOPBACK))
            .filter_map(|ifa| ifa.address.as_ref()?.as_link_addr()?.addr())
            .find(|addr| addr.iter().any(|&b| b != 0))
            .ok_or(Error::NoHardwareAddress)
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd"
)))]
impl HwAddrSource for InterfaceHwAddr {
    fn hardware_addr(&self) -> Result<[u8; 6], Error> {
        Err(Error::NoHardwareAddress)
    }
}
