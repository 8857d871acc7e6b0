//! Master key generation and storage.
//!
//! A project has exactly one symmetric master key, stored next to the
//! project as `.envsync.key`: 64 lowercase hex characters and a newline,
//! readable by the owner only.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::constants::{KEY_FILE, KEY_LENGTH};
use crate::core::files;
use crate::error::{KeyError, Result};

/// A 256-bit master key.
///
/// The bytes are wiped when the key is dropped and never appear in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LENGTH]);

impl MasterKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh key from the operating system CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::GenerationFailed` if the random source fails.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;
        let key = Self(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Parse the canonical hex form.
    ///
    /// Accepts exactly 64 hex digits in either case and nothing else.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != KEY_LENGTH * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut bytes = [0u8; KEY_LENGTH];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        let key = Self(bytes);
        bytes.zeroize();
        Some(key)
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Path of the key file for a project.
pub fn key_file_path(project_root: &Path) -> PathBuf {
    project_root.join(KEY_FILE)
}

/// Whether the project has a key file.
pub fn has_key(project_root: &Path) -> bool {
    key_file_path(project_root).exists()
}

/// Generate a new master key and write it to the project's key file.
///
/// Any existing key file is overwritten. Callers that must not rotate a key
/// silently should check [`has_key`] first.
///
/// # Returns
///
/// The lowercase hex encoding of the new key.
///
/// # Errors
///
/// Returns `KeyError::WriteFailed` if the key file cannot be written.
pub fn generate_key(project_root: &Path) -> Result<String> {
    let path = key_file_path(project_root);
    debug!(path = %path.display(), "generating master key");

    let key = MasterKey::generate()?;
    let hex = key.to_hex();
    let contents = Zeroizing::new(format!("{}\n", hex.as_str()));

    files::write_private(&path, contents.as_bytes()).map_err(KeyError::WriteFailed)?;

    debug!(path = %path.display(), "master key saved");
    Ok(hex.as_str().to_owned())
}

/// Load and validate the project's master key.
///
/// Surrounding whitespace in the file is ignored.
///
/// # Errors
///
/// Returns `KeyError::NotFound` if the key file does not exist, or
/// `KeyError::Malformed` if its content is not exactly 64 hex digits.
pub fn load_key(project_root: &Path) -> Result<MasterKey> {
    let path = key_file_path(project_root);
    debug!(path = %path.display(), "loading master key");

    if !path.exists() {
        return Err(KeyError::NotFound { path }.into());
    }

    #[cfg(unix)]
    check_permissions(&path);

    let raw = Zeroizing::new(fs::read(&path).map_err(KeyError::ReadFailed)?);
    let key = std::str::from_utf8(&raw)
        .ok()
        .and_then(|text| MasterKey::from_hex(text.trim()))
        .ok_or_else(|| KeyError::Malformed { path: path.clone() })?;

    debug!("master key loaded");
    Ok(key)
}

/// Warn when the key file is readable by anyone but its owner.
#[cfg(unix)]
fn check_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}
