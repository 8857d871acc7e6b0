//! Diff command - redacted comparison of the local env file and the lock.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::cli::{display_path, output};
use crate::core::diff::{ChangeKind, Diff};
use crate::core::{config::Config, files, keystore};
use crate::error::Result;

const CONTEXT_LINES: usize = 3;

/// Show what changed between the lock file and the local env file.
///
/// Missing files are reported, not treated as errors.
pub fn execute(
    root: &Path,
    env: Option<PathBuf>,
    lockfile: Option<PathBuf>,
    unified: bool,
) -> Result<()> {
    let config = Config::load(root)?;
    let env_path = config.env_path(root, env.as_deref());
    let lock_path = config.lock_path(root, lockfile.as_deref());
    let env_name = display_path(root, &env_path);
    let lock_name = display_path(root, &lock_path);

    output::header(&format!("Diff: {} vs {}", env_name, lock_name));
    println!();

    match (env_path.exists(), lock_path.exists()) {
        (false, false) => {
            output::warn(&format!("Neither {} nor {} found.", env_name, lock_name));
            output::hint(&format!("run {} to get started", output::cmd("envsync init")));
            return Ok(());
        }
        (_, false) => {
            output::warn(&format!(
                "{} not found - nothing to compare against.",
                lock_name
            ));
            output::hint(&format!(
                "run {} to create the first lock",
                output::cmd("envsync lock")
            ));
            return Ok(());
        }
        (false, true) => {
            output::warn(&format!("{} not found locally.", env_name));
            output::hint(&format!(
                "run {} to restore it",
                output::cmd("envsync unlock")
            ));
            return Ok(());
        }
        (true, true) => {}
    }

    let key = keystore::load_key(root)?;
    let locked = files::decrypt_to_string(&lock_path, &key)?;
    let local = Zeroizing::new(fs::read_to_string(&env_path)?);

    if *local == *locked {
        output::success(&format!(
            "In sync - {} matches {} exactly.",
            env_name, lock_name
        ));
        return Ok(());
    }

    let diff = Diff::compute(&locked, &local);

    if unified {
        let patch = diff.unified(&lock_name, &format!("{} (local)", env_name), CONTEXT_LINES);
        output::dimmed(patch.trim_end());
        return Ok(());
    }

    for change in diff.changes() {
        let line = change.redacted();
        match change.kind() {
            ChangeKind::Added => output::added(&line),
            ChangeKind::Removed => output::removed(&line),
            ChangeKind::Unchanged => output::unchanged(&line),
        }
    }

    println!();
    output::summary(diff.added(), diff.removed());
    println!();
    output::hint(&format!(
        "run {} to update {} with local changes",
        output::cmd("envsync lock"),
        lock_name
    ));

    Ok(())
}
