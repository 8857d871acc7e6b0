//! Lock codec.
//!
//! Turns plaintext into a self-describing, authenticated lock file and back.
//! Every lock gets a fresh salt and nonce; the salt feeds a memory-hard KDF
//! that turns the shared master key into a per-lock AES-256-GCM key.
//!
//! ## Key derivation
//!
//! Derivation is behind the [`Kdf`] trait. [`Scrypt`] is the only
//! implementation that produces interoperable lock files; the seam exists so
//! callers can observe or replace derivation without touching the format.
//!
//! ## Example
//!
//! ```ignore
//! let key = keystore::load_key(root)?;
//! let locked = cipher::encrypt("API_KEY=sk-123\n", &key)?;
//! assert_eq!(cipher::decrypt(&locked, &key)?, "API_KEY=sk-123\n");
//! ```

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroize;

use crate::core::constants::{AUTH_TAG_LENGTH, IV_LENGTH, SALT_LENGTH};
use crate::core::keystore::MasterKey;
use crate::error::{LockError, Result};

mod envelope;
mod kdf;

pub use envelope::Envelope;
pub use kdf::{Kdf, Scrypt};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypts and decrypts lock files.
#[derive(Debug, Clone, Default)]
pub struct LockCodec<K = Scrypt> {
    kdf: K,
}

impl LockCodec<Scrypt> {
    /// Codec using the standard scrypt derivation.
    pub fn new() -> Self {
        Self { kdf: Scrypt }
    }
}

impl<K: Kdf> LockCodec<K> {
    /// Codec using a custom key derivation.
    pub fn with_kdf(kdf: K) -> Self {
        Self { kdf }
    }

    /// The key derivation in use.
    pub fn kdf(&self) -> &K {
        &self.kdf
    }

    /// Encrypt `plaintext` into a lock file.
    ///
    /// # Errors
    ///
    /// Returns `LockError::EncryptionFailed` if the random source or cipher
    /// fails, or `LockError::KeyDerivation` if derivation fails.
    pub fn encrypt(&self, plaintext: &str, key: &MasterKey) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LENGTH];
        let mut iv = [0u8; IV_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .and_then(|_| OsRng.try_fill_bytes(&mut iv))
            .map_err(|e| LockError::EncryptionFailed(format!("random source: {}", e)))?;

        let derived = self.kdf.derive(key, &salt)?;
        let cipher = Aes256Gcm16::new_from_slice(&derived[..])
            .map_err(|e| LockError::EncryptionFailed(e.to_string()))?;

        let mut buffer = plaintext.as_bytes().to_vec();
        let nonce = Nonce::<U16>::from_slice(&iv);
        let tag = match cipher.encrypt_in_place_detached(nonce, b"", &mut buffer) {
            Ok(tag) => tag,
            Err(_) => {
                buffer.zeroize();
                return Err(LockError::EncryptionFailed("cipher error".to_string()).into());
            }
        };

        let mut tag_bytes = [0u8; AUTH_TAG_LENGTH];
        tag_bytes.copy_from_slice(&tag);

        let locked = Envelope::new(&salt, &iv, &tag_bytes, &buffer).to_bytes();
        trace!(
            plaintext_len = plaintext.len(),
            locked_len = locked.len(),
            "encrypted"
        );
        Ok(locked)
    }

    /// Decrypt a lock file.
    ///
    /// The magic is validated before any key derivation happens.
    ///
    /// # Errors
    ///
    /// Returns `LockError::BadFormat` if `data` is not a lock file or the
    /// payload is not UTF-8, and `LockError::DecryptionFailed` if
    /// authentication fails (wrong key or tampered data).
    pub fn decrypt(&self, data: &[u8], key: &MasterKey) -> Result<String> {
        let envelope = Envelope::parse(data)?;
        trace!(ciphertext_len = envelope.ciphertext().len(), "decrypting");

        let derived = self.kdf.derive(key, envelope.salt())?;
        let cipher = Aes256Gcm16::new_from_slice(&derived[..])
            .map_err(|e| LockError::KeyDerivation(e.to_string()))?;

        let mut buffer = envelope.ciphertext().to_vec();
        cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(envelope.iv()),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(envelope.tag()),
            )
            .map_err(|_| LockError::DecryptionFailed)?;

        String::from_utf8(buffer).map_err(|e| {
            e.into_bytes().zeroize();
            LockError::BadFormat.into()
        })
    }
}

/// Encrypt `plaintext` with the standard codec.
///
/// See [`LockCodec::encrypt`].
pub fn encrypt(plaintext: &str, key: &MasterKey) -> Result<Vec<u8>> {
    LockCodec::new().encrypt(plaintext, key)
}

/// Decrypt a lock file with the standard codec.
///
/// See [`LockCodec::decrypt`].
pub fn decrypt(data: &[u8], key: &MasterKey) -> Result<String> {
    LockCodec::new().decrypt(data, key)
}
