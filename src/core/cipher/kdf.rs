//! Per-lock key derivation.

use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{KEY_LENGTH, SALT_LENGTH, SCRYPT_LOG_N, SCRYPT_P, SCRYPT_R};
use crate::core::keystore::MasterKey;
use crate::error::{LockError, Result};

/// Derives the key that actually encrypts one lock file.
///
/// The same implementation must be used on both ends: its parameters are
/// not recorded in the lock file.
pub trait Kdf {
    /// Derive a 32-byte key from the master key and a per-lock salt.
    ///
    /// # Errors
    ///
    /// Returns `LockError::KeyDerivation` if the primitive fails.
    fn derive(
        &self,
        master: &MasterKey,
        salt: &[u8; SALT_LENGTH],
    ) -> Result<Zeroizing<[u8; KEY_LENGTH]>>;
}

/// scrypt with N = 2^14, r = 8, p = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scrypt;

impl Kdf for Scrypt {
    fn derive(
        &self,
        master: &MasterKey,
        salt: &[u8; SALT_LENGTH],
    ) -> Result<Zeroizing<[u8; KEY_LENGTH]>> {
        let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LENGTH)
            .map_err(|e| LockError::KeyDerivation(e.to_string()))?;

        let mut derived = Zeroizing::new([0u8; KEY_LENGTH]);
        scrypt::scrypt(master.as_bytes(), salt, &params, &mut derived[..])
            .map_err(|e| LockError::KeyDerivation(e.to_string()))?;

        trace!("derived per-lock key");
        Ok(derived)
    }
}
