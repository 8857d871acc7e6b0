//! Unlock command - decrypt the lock file into the env file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::{display_path, output};
use crate::core::{config::Config, files, keystore, status};
use crate::error::{LockError, Result};

/// Decrypt the lock file into the env file.
///
/// Refuses to overwrite an env file that is newer than the lock file unless
/// `force` is set.
pub fn execute(
    root: &Path,
    env: Option<PathBuf>,
    lockfile: Option<PathBuf>,
    quiet: bool,
    force: bool,
) -> Result<()> {
    let config = Config::load(root)?;
    let env_path = config.env_path(root, env.as_deref());
    let lock_path = config.lock_path(root, lockfile.as_deref());

    if !lock_path.exists() {
        return Err(LockError::SourceNotFound { path: lock_path }.into());
    }

    if env_path.exists() && !force && status::is_newer(&env_path, &lock_path)? {
        debug!(env = %env_path.display(), "env file newer than lock file");
        return Err(LockError::EnvNewer { path: env_path }.into());
    }

    let key = keystore::load_key(root)?;
    files::decrypt_file(&lock_path, &env_path, &key)?;
    info!(force, "unlocked");

    let env_name = display_path(root, &env_path);
    if quiet {
        println!("{} updated.", env_name);
        return Ok(());
    }

    output::success(&format!(
        "decrypted: {} -> {}",
        display_path(root, &lock_path),
        output::path(&env_name)
    ));
    output::dimmed("  file mode: 600");

    Ok(())
}
