//! Nullable UUIDs and scanning from database driver values.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{Error, Uuid};

/// A column value as handed over by a database driver.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum DriverValue<'a> {
    /// SQL `NULL`.
    Null,
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Real(f64),
    /// Boolean.
    Bool(bool),
    /// Raw bytes; either the 16-byte binary form or text.
    Bytes(&'a [u8]),
    /// Text.
    Text(&'a str),
    /// Date and time.
    Timestamp(DateTime<Utc>),
}

impl DriverValue<'_> {
    /// Returns the type name used in [`Error::Conversion`].
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "i64",
            Self::Real(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "string",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl<'a> From<&'a str> for DriverValue<'a> {
    fn from(src: &'a str) -> Self {
        Self::Text(src)
    }
}

impl<'a> From<&'a [u8]> for DriverValue<'a> {
    fn from(src: &'a [u8]) -> Self {
        Self::Bytes(src)
    }
}

impl Uuid {
    /// Reads a UUID from a driver value.
    ///
    /// Exactly 16 bytes are taken as the binary form; any other byte string or text goes through
    /// the text parser. Every other value type fails with [`Error::Conversion`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{DriverValue, Error, Uuid};
    ///
    /// let uuid = Uuid::scan(DriverValue::Text("6ba7b810-9dad-11d1-80b4-00c04fd430c8"))?;
    /// assert_eq!(Uuid::scan(DriverValue::Bytes(uuid.as_bytes())), Ok(uuid));
    /// assert_eq!(Uuid::scan(DriverValue::Integer(1)), Err(Error::Conversion("i64")));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn scan(src: DriverValue<'_>) -> Result<Self, Error> {
        match src {
            DriverValue::Bytes(bytes) if bytes.len() == 16 => Self::from_slice(bytes),
            DriverValue::Bytes(bytes) => Self::parse_ascii(bytes),
            DriverValue::Text(text) => Self::parse_str(text),
            other => Err(Error::Conversion(other.type_name())),
        }
    }

    /// Returns the canonical string handed to a database driver.
    pub fn value(&self) -> String {
        self.to_string()
    }
}

/// A UUID that may be absent, distinct from [`Uuid::NIL`].
///
/// # Examples
///
/// ```rust
/// use rfc_uuid::{DriverValue, NullUuid, Uuid};
///
/// let absent = NullUuid::scan(DriverValue::Null)?;
/// assert!(!absent.is_valid());
/// assert_eq!(absent.value(), None);
///
/// let nil = NullUuid::scan(DriverValue::Text("00000000-0000-0000-0000-000000000000"))?;
/// assert_eq!(nil.uuid(), Some(Uuid::NIL));
/// # Ok::<(), rfc_uuid::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct NullUuid(pub Option<Uuid>);

impl NullUuid {
    /// The absent value.
    pub const NULL: Self = Self(None);

    /// Wraps a present UUID.
    pub const fn new(uuid: Uuid) -> Self {
        Self(Some(uuid))
    }

    /// Returns true if a UUID is present.
    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the UUID, if present.
    pub const fn uuid(&self) -> Option<Uuid> {
        self.0
    }

    /// Reads a nullable UUID; [`DriverValue::Null`] yields the absent value.
    pub fn scan(src: DriverValue<'_>) -> Result<Self, Error> {
        match src {
            DriverValue::Null => Ok(Self::NULL),
            other => Uuid::scan(other).map(Self::new),
        }
    }

    /// Returns the canonical string, or `None` when absent.
    pub fn value(&self) -> Option<String> {
        self.0.as_ref().map(Uuid::value)
    }
}

impl From<Uuid> for NullUuid {
    fn from(src: Uuid) -> Self {
        Self::new(src)
    }
}

impl From<Option<Uuid>> for NullUuid {
    fn from(src: Option<Uuid>) -> Self {
        Self(src)
    }
}

impl From<NullUuid> for Option<Uuid> {
    fn from(src: NullUuid) -> Self {
        src.0
    }
}

impl fmt::Display for NullUuid {
    /// Writes the canonical string, or `null` when absent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(uuid) => fmt::Display::fmt(uuid, f),
            None => f.write_str("null"),
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::NullUuid;
    use crate::Uuid;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for NullUuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for NullUuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Option::<Uuid>::deserialize(deserializer).map(Self)
        }
    }

}
