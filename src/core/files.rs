//! File-level lock and unlock.
//!
//! Thin wrappers that read a source file, run it through the lock codec and
//! write the result. Files holding plaintext secrets are written owner-only.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::keystore::MasterKey;
use crate::error::{LockError, Result};

/// Encrypt `env_path` into `lock_path`.
///
/// # Errors
///
/// Returns `LockError::SourceNotFound` if `env_path` does not exist, or an
/// I/O error if either file cannot be read or written.
pub fn encrypt_file(env_path: &Path, lock_path: &Path, key: &MasterKey) -> Result<()> {
    if !env_path.exists() {
        return Err(LockError::SourceNotFound {
            path: env_path.to_path_buf(),
        }
        .into());
    }

    let plaintext = Zeroizing::new(fs::read_to_string(env_path)?);
    let locked = cipher::encrypt(&plaintext, key)?;
    fs::write(lock_path, &locked)?;

    debug!(
        src = %env_path.display(),
        dst = %lock_path.display(),
        bytes = locked.len(),
        "lock file written"
    );
    Ok(())
}

/// Decrypt `lock_path` into `env_path` with owner-only permissions.
///
/// # Errors
///
/// Returns `LockError::SourceNotFound` if `lock_path` does not exist, plus
/// any error from [`cipher::decrypt`].
pub fn decrypt_file(lock_path: &Path, env_path: &Path, key: &MasterKey) -> Result<()> {
    let plaintext = decrypt_to_string(lock_path, key)?;
    write_private(env_path, plaintext.as_bytes())?;

    debug!(
        src = %lock_path.display(),
        dst = %env_path.display(),
        "env file restored"
    );
    Ok(())
}

/// Decrypt `lock_path` and return its plaintext.
///
/// # Errors
///
/// Returns `LockError::SourceNotFound` if `lock_path` does not exist, plus
/// any error from [`cipher::decrypt`].
pub fn decrypt_to_string(lock_path: &Path, key: &MasterKey) -> Result<Zeroizing<String>> {
    if !lock_path.exists() {
        return Err(LockError::SourceNotFound {
            path: lock_path.to_path_buf(),
        }
        .into());
    }

    let data = fs::read(lock_path)?;
    Ok(Zeroizing::new(cipher::decrypt(&data, key)?))
}

/// Write `contents` to `path`, readable and writable by the owner only.
///
/// A file that already exists has its permissions tightened as well.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}
