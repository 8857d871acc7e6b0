//! Lock command - encrypt the env file into the lock file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{display_path, output};
use crate::core::{config::Config, files, keystore};
use crate::error::Result;

/// Encrypt the env file into the lock file.
pub fn execute(root: &Path, env: Option<PathBuf>, out: Option<PathBuf>, quiet: bool) -> Result<()> {
    let config = Config::load(root)?;
    let env_path = config.env_path(root, env.as_deref());
    let lock_path = config.lock_path(root, out.as_deref());

    let key = keystore::load_key(root)?;
    files::encrypt_file(&env_path, &lock_path, &key)?;

    let size = fs::metadata(&lock_path)?.len();
    info!(bytes = size, "locked");

    let lock_name = display_path(root, &lock_path);
    if quiet {
        println!("{} updated.", lock_name);
        return Ok(());
    }

    output::success(&format!(
        "encrypted: {} -> {}",
        display_path(root, &env_path),
        output::path(&lock_name)
    ));
    output::dimmed(&format!("  lock file size: {} bytes", size));
    println!();
    output::dimmed(&format!("  commit {} to share with your team:", lock_name));
    println!(
        "  {}",
        output::cmd(&format!(
            "git add {} && git commit -m 'chore: update env lockfile'",
            lock_name
        ))
    );

    Ok(())
}
