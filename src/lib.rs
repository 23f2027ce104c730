//! RFC 4122 / RFC 9562 UUIDs: a strict six-shape text codec, a 16-byte binary codec, timestamp
//! extraction and a thread-safe generator for versions 1 through 8.
//!
//! ```rust
//! use rfc_uuid::{Generator, Uuid, NAMESPACE_DNS};
//!
//! let g = Generator::new();
//! let uuid = g.new_v7()?;
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let named = Uuid::new_v5(&NAMESPACE_DNS, "www.example.com");
//! assert_eq!(named, "urn:uuid:2ed6657d-e927-568b-95e1-2665a8aea6a2".parse::<Uuid>()?);
//! # Ok::<(), rfc_uuid::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! Every UUID shares the 4-bit `ver` field at the top of byte 6 and the `var` field at the top
//! of byte 8. The Gregorian-time version 1 lays out a 60-bit count of 100-nanosecond ticks since
//! 1582-10-15, a 14-bit clock sequence and a 48-bit node identifier:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Version 6 stores the same ticks most significant first so that byte order follows creation
//! time. Version 7 starts with a 48-bit `unix_ts_ms` followed by a 42-bit counter and 32 random
//! bits:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        counter                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! # Generator
//!
//! [`Generator`] owns the clock sequence, the latest timestamps and the node identifier. There
//! is no process-wide instance: create one where the application is assembled and pass it by
//! reference. Its clock, random source and node identifier source can be replaced through
//! [`GeneratorBuilder`].
//!
//! # Crate features
//!
//! No feature is enabled by default. Optional features:
//!
//! - `bson` enables embedding [`Uuid`] in BSON documents as a binary element via the [bson]
//!   crate.
//! - `serde` enables serialization/deserialization of [`Uuid`] and [`NullUuid`] via serde.
//! - `uuid` enables conversion from/to the [uuid] crate's `Uuid` type.
//!
//! [bson]: https://crates.io/crates/bson
//! [uuid]: https://crates.io/crates/uuid

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::{Uuid, SIZE};

mod version;
pub use version::{Variant, Version};

mod parse;

pub mod timestamp;
pub use timestamp::Timestamp;

mod v1;
pub use v1::Domain;

mod v4;
pub use v4::new_v4;

mod v5;
pub use v5::{NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500};

mod v7;

mod v8;

mod generator;
pub use generator::{
    Clock, Generator, GeneratorBuilder, HwAddrSource, InterfaceHwAddr, OsRandom, RandSource,
    SystemClock, UuidGenerator,
};

mod null;
pub use null::{DriverValue, NullUuid};

#[cfg(feature = "bson")]
#[cfg_attr(docsrs, doc(cfg(feature = "bson")))]
mod bson_support;
