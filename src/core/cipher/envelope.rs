//! Lock file envelope.
//!
//! Binary layout, all fields raw bytes:
//!
//! ```text
//! [8]   magic       "ENVSYNC1"
//! [32]  salt        scrypt salt for the per-lock key
//! [16]  iv          AES-GCM nonce
//! [16]  auth tag    AES-GCM tag
//! [..]  ciphertext  everything after the header
//! ```

use crate::core::constants::{AUTH_TAG_LENGTH, HEADER_LENGTH, IV_LENGTH, MAGIC, SALT_LENGTH};
use crate::error::{LockError, Result};

/// A parsed lock file, borrowing from the raw bytes.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    salt: &'a [u8; SALT_LENGTH],
    iv: &'a [u8; IV_LENGTH],
    tag: &'a [u8; AUTH_TAG_LENGTH],
    ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Assemble an envelope from its parts.
    pub fn new(
        salt: &'a [u8; SALT_LENGTH],
        iv: &'a [u8; IV_LENGTH],
        tag: &'a [u8; AUTH_TAG_LENGTH],
        ciphertext: &'a [u8],
    ) -> Self {
        Self {
            salt,
            iv,
            tag,
            ciphertext,
        }
    }

    /// Parse a lock file.
    ///
    /// The magic is checked first, so foreign input is rejected without
    /// looking any further.
    ///
    /// # Errors
    ///
    /// Returns `LockError::BadFormat` if the magic is missing or wrong, or if
    /// the input ends inside the fixed header.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let rest = data
            .strip_prefix(MAGIC.as_slice())
            .ok_or(LockError::BadFormat)?;

        if data.len() < HEADER_LENGTH {
            return Err(LockError::BadFormat.into());
        }

        let (salt, rest) = rest.split_at(SALT_LENGTH);
        let (iv, rest) = rest.split_at(IV_LENGTH);
        let (tag, ciphertext) = rest.split_at(AUTH_TAG_LENGTH);

        Ok(Self {
            salt: salt.try_into().map_err(|_| LockError::BadFormat)?,
            iv: iv.try_into().map_err(|_| LockError::BadFormat)?,
            tag: tag.try_into().map_err(|_| LockError::BadFormat)?,
            ciphertext,
        })
    }

    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LENGTH + self.ciphertext.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(self.salt);
        out.extend_from_slice(self.iv);
        out.extend_from_slice(self.tag);
        out.extend_from_slice(self.ciphertext);
        out
    }

    pub fn salt(&self) -> &'a [u8; SALT_LENGTH] {
        self.salt
    }

    pub fn iv(&self) -> &'a [u8; IV_LENGTH] {
        self.iv
    }

    pub fn tag(&self) -> &'a [u8; AUTH_TAG_LENGTH] {
        self.tag
    }

    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }
}
