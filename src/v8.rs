//! Vendor-specific version 8 UUIDs.

use crate::{Uuid, Version};

impl Uuid {
    /// Creates a version 8 UUID from caller-defined bytes.
    ///
    /// All 122 bits other than the version and variant fields are kept as given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc_uuid::Uuid;
    ///
    /// let uuid = Uuid::new_v8([0x11; 16]);
    /// assert_eq!(uuid.to_string(), "11111111-1111-8111-9111-111111111111");
    /// ```
    pub const fn new_v8(bytes: [u8; 16]) -> Self {
        Self::from_bytes_with_version(bytes, Version::Custom)
    }
}
