//! Error type shared by parsing, decoding, extraction and generation.

use thiserror::Error;

use crate::Uuid;

/// Errors returned by this crate.
///
/// Every message carries the `uuid: ` prefix followed by contextual detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Text input length matches none of the accepted shapes.
    #[error("uuid: incorrect UUID length {len} in string {input:?}")]
    IncorrectLength { len: usize, input: String },

    /// Text input has an accepted length but wrong dashes, braces or `urn:uuid:` prefix.
    #[error("uuid: incorrect UUID format in string {0:?}")]
    IncorrectFormat(String),

    /// Well-shaped text input contains a non-hexadecimal digit in the given digit pair.
    #[error("uuid: invalid UUID format in digits {0:?}")]
    InvalidFormat(String),

    /// The clock reads beyond the range of the timestamp field, so no further UUID can be
    /// distinguished from the ones already issued.
    #[error("uuid: clock beyond the {0} timestamp range")]
    ClockOverflow(&'static str),

    /// Binary input is not exactly 16 bytes long.
    #[error("uuid: UUID must be exactly 16 bytes long, got {0} bytes")]
    IncorrectByteLength(usize),

    /// The generator could not resolve a node identifier.
    #[error("uuid: no HW address found")]
    NoHardwareAddress,

    /// Timestamp extraction was asked for a version the UUID does not carry.
    #[error("uuid: {uuid} is version {actual}, not version {expected}")]
    VersionMismatch { uuid: Uuid, actual: u8, expected: u8 },

    /// A scanning adapter received a value of an unsupported type.
    #[error("uuid: cannot convert {0} to UUID")]
    Conversion(&'static str),

    /// The entropy source failed to produce random bytes.
    #[error("uuid: random source failure: {0}")]
    RandomSource(String),
}

impl Error {
    /// Returns true if this error was produced by one of the text or binary decoders.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::IncorrectLength { .. }
                | Error::IncorrectFormat(_)
                | Error::InvalidFormat(_)
                | Error::IncorrectByteLength(_)
        )
    }

    /// Renders a possibly non-UTF-8 input fragment for diagnostics.
    pub(crate) fn fragment(src: &[u8]) -> String {
        String::from_utf8_lossy(src).into_owned()
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomSource(err.to_string())
    }
}
