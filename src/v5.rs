//! Name-based versions 3 (MD5) and 5 (SHA-1).

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::{Uuid, Version};

/// Namespace for fully-qualified domain names.
pub const NAMESPACE_DNS: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Namespace for URLs.
pub const NAMESPACE_URL: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Namespace for ISO OIDs.
pub const NAMESPACE_OID: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Namespace for X.500 DNs in DER or text.
pub const NAMESPACE_X500: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

impl Uuid {
    /// Creates a version 3 UUID from the MD5 digest of `namespace` followed by `name`.
    ///
    /// The result is deterministic for a given pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{Uuid, NAMESPACE_DNS};
    ///
    /// let uuid = Uuid::new_v3(&NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "5df41881-3aed-3515-88a7-2f4a814cf09e");
    /// ```
    pub fn new_v3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        let digest = Md5::new()
            .chain_update(namespace.as_bytes())
            .chain_update(name)
            .finalize();
        Self::from_digest(&digest, Version::Md5)
    }

    /// Creates a version 5 UUID from the first 16 bytes of the SHA-1 digest of `namespace`
    /// followed by `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::{Uuid, NAMESPACE_DNS};
    ///
    /// let uuid = Uuid::new_v5(&NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
    /// ```
    pub fn new_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        let digest = Sha1::new()
            .chain_update(namespace.as_bytes())
            .chain_update(name)
            .finalize();
        Self::from_digest(&digest, Version::Sha1)
    }

    fn from_digest(digest: &[u8], version: Version) -> Self {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self::from_bytes_with_version(bytes, version)
    }
}
