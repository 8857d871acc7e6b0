//! Status command - key, file and sync state overview.

use std::path::{Path, PathBuf};

use crate::cli::{display_path, output};
use crate::core::config::Config;
use crate::core::status::{FileStatus, Report, SyncState, Undetermined};
use crate::error::{Error, Result};

/// Show sync status as text or JSON.
pub fn execute(
    root: &Path,
    env: Option<PathBuf>,
    lockfile: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = Config::load(root)?;
    let env_path = config.env_path(root, env.as_deref());
    let lock_path = config.lock_path(root, lockfile.as_deref());

    let report = Report::collect(root, &env_path, &lock_path)?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| Error::Other(format!("failed to serialize status: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    render(root, &report);
    Ok(())
}

fn render(root: &Path, report: &Report) {
    output::section("envsync status");

    if report.key.exists {
        output::kv("key", format!("✓ {}", report.key.path.display()));
    } else {
        output::kv("key", format!("✗ not found at {}", report.key.path.display()));
    }
    output::kv(&display_path(root, &report.env.path), describe(&report.env));
    output::kv(&display_path(root, &report.lock.path), describe(&report.lock));
    println!();

    if !report.key.exists {
        output::hint(&format!(
            "run {} or copy your team's key into place",
            output::cmd("envsync init")
        ));
    }

    match (report.state, report.undetermined) {
        (Some(SyncState::InSync), _) => {
            output::success("Status: IN SYNC");
            output::dimmed("  your env file matches the lock file exactly.");
        }
        (Some(SyncState::LocalChanges), _) => {
            output::warn("Status: LOCAL CHANGES");
            output::dimmed("  the env file has been modified since the last lock.");
            output::hint(&format!(
                "run {} to update the lock file and commit it",
                output::cmd("envsync lock")
            ));
            see_diff();
        }
        (Some(SyncState::LockUpdated), _) => {
            output::warn("Status: LOCK UPDATED");
            output::dimmed("  the lock file is newer; your local env file may be stale.");
            output::hint(&format!(
                "run {} to update your local env file",
                output::cmd("envsync unlock")
            ));
            see_diff();
        }
        (None, Some(Undetermined::KeyMalformed)) => {
            output::error("Cannot check sync - key is malformed.");
        }
        (None, Some(Undetermined::DecryptionFailed)) => {
            output::error("Cannot read the lock file - decryption failed.");
            output::dimmed("  wrong key, or the file may be corrupted.");
        }
        (None, _) => {
            output::dimmed("(cannot determine sync status - missing files or key)");
        }
    }
}

fn describe(file: &FileStatus) -> String {
    match (file.exists, file.modified) {
        (true, Some(modified)) => {
            format!("found (modified {})", modified.format("%Y-%m-%d %H:%M:%S"))
        }
        (true, None) => "found".to_string(),
        (false, _) => "not found".to_string(),
    }
}

fn see_diff() {
    output::hint(&format!(
        "run {} to see what changed",
        output::cmd("envsync diff")
    ));
}
