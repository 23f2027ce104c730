//! Embedding in BSON documents as a binary element of the UUID subtype.
//!
//! ```rust
//! use bson::{doc, Document};
//! use rfc_uuid::Uuid;
//!
//! let id = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8")?;
//! let doc = doc! { "_id": id };
//! assert_eq!(doc.get("_id").map(Uuid::try_from), Some(Ok(id)));
//! # Ok::<(), rfc_uuid::Error>(())
//! ```

use bson::{spec::BinarySubtype, Binary, Bson};

use crate::{Error, Uuid};

impl From<Uuid> for Binary {
    fn from(src: Uuid) -> Self {
        Binary {
            subtype: BinarySubtype::Uuid,
            bytes: src.to_bytes().to_vec(),
        }
    }
}

impl From<Uuid> for Bson {
    fn from(src: Uuid) -> Self {
        Bson::Binary(src.into())
    }
}

impl TryFrom<&Binary> for Uuid {
    type Error = Error;

    /// Accepts the UUID subtype and its legacy predecessor carrying exactly 16 bytes.
    fn try_from(src: &Binary) -> Result<Self, Self::Error> {
        match src.subtype {
            BinarySubtype::Uuid | BinarySubtype::UuidOld => Self::from_slice(&src.bytes),
            other => Err(Error::IncorrectFormat(format!(
                "bson binary subtype {:?}",
                other
            ))),
        }
    }
}

impl TryFrom<Binary> for Uuid {
    type Error = Error;

    fn try_from(src: Binary) -> Result<Self, Self::Error> {
        Self::try_from(&src)
    }
}

impl TryFrom<&Bson> for Uuid {
    type Error = Error;

    /// Rejects every element that is not binary data.
    fn try_from(src: &Bson) -> Result<Self, Self::Error> {
        match src {
            Bson::Binary(binary) => Self::try_from(binary),
            other => Err(Error::IncorrectFormat(format!(
                "bson element {:?}",
                other.element_type()
            ))),
        }
    }
}

impl TryFrom<Bson> for Uuid {
    type Error = Error;

    fn try_from(src: Bson) -> Result<Self, Self::Error> {
        Self::try_from(&src)
    }
}
