//! Random version 4 UUIDs.

use rand::{rngs::OsRng, RngCore};

use crate::{Error, Uuid, Version};

impl Uuid {
    /// Creates a version 4 UUID from sixteen random bytes, overwriting the version and variant
    /// bits.
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::from_bytes_with_version(bytes, Version::Random)
    }
}

/// Generates a version 4 UUID from the operating system's entropy source.
///
/// This function holds no state and needs no generator instance.
///
/// # Examples
///
/// ```rust
/// use rfc_uuid::new_v4;
///
/// let uuid = new_v4()?;
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), rfc_uuid::Error>(())
/// ```
pub fn new_v4() -> Result<Uuid, Error> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(Uuid::from_random_bytes(bytes))
}
