//! Git post-merge hook.
//!
//! The hook runs `envsync unlock --quiet` after every pull or merge so the
//! local `.env` follows the committed lock file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::HOOK_MARKER;
use crate::error::{HookError, Result};

const SHEBANG: &str = "#!/bin/sh";

/// What [`install_hook`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// No hook existed; ours was written.
    Installed,
    /// Ours was appended to a foreign hook, or refreshed in place.
    Updated,
    /// Our hook was already present.
    Skipped,
}

impl HookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
        }
    }
}

/// Result of [`install_hook`].
#[derive(Debug, Clone)]
pub struct HookInstall {
    pub status: HookStatus,
    pub path: PathBuf,
}

/// Path of the post-merge hook for a project.
pub fn hook_path(project_root: &Path) -> PathBuf {
    project_root.join(".git").join("hooks").join("post-merge")
}

/// Our block, from the marker line to the end of the hook.
fn hook_block(lock: &str) -> String {
    format!(
        r#"{HOOK_MARKER}
# Auto-unlock after git pull/merge if the lock file is present
envsync_lock={lock}
if command -v envsync >/dev/null 2>&1; then
  if [ -f "$envsync_lock" ]; then
    echo "envsync: updating from $envsync_lock..."
    envsync unlock --quiet --lockfile "$envsync_lock" || echo "envsync: unlock failed (key missing?)"
  fi
fi
"#,
        lock = shell_quote(lock)
    )
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Byte offset of the marker line, if the hook holds our block.
fn marker_offset(contents: &str) -> Option<usize> {
    let mut offset = 0;
    for line in contents.split_inclusive('\n') {
        if line.trim() == HOOK_MARKER {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Install the post-merge hook for the lock file at `lock_path`.
///
/// A hook that already carries our block is rewritten only when the block
/// is out of date, e.g. after the lock file moved.
///
/// # Errors
///
/// Returns `HookError::NotARepository` if `.git/hooks` does not exist, or an
/// I/O error if the hook cannot be read or written.
pub fn install_hook(project_root: &Path, lock_path: &Path) -> Result<HookInstall> {
    let path = hook_path(project_root);
    let hooks_dir = project_root.join(".git").join("hooks");

    if !hooks_dir.is_dir() {
        return Err(HookError::NotARepository {
            root: project_root.to_path_buf(),
        }
        .into());
    }

    let lock = lock_path
        .strip_prefix(project_root)
        .unwrap_or(lock_path)
        .display()
        .to_string();
    let block = hook_block(&lock);

    let status = if path.exists() {
        let existing = fs::read_to_string(&path)?;
        match marker_offset(&existing) {
            Some(start) if existing[start..].trim_end() == block.trim_end() => {
                debug!(path = %path.display(), "hook already installed");
                return Ok(HookInstall {
                    status: HookStatus::Skipped,
                    path,
                });
            }
            Some(start) => fs::write(&path, format!("{}{}", &existing[..start], block))?,
            None => fs::write(&path, format!("{}\n{}\n{}", existing, SHEBANG, block))?,
        }
        HookStatus::Updated
    } else {
        fs::write(&path, format!("{}\n{}", SHEBANG, block))?;
        HookStatus::Installed
    };

    set_executable(&path)?;
    debug!(path = %path.display(), lock = %lock, status = status.as_str(), "hook written");

    Ok(HookInstall { status, path })
}

/// Remove the envsync block from the post-merge hook.
///
/// Everything before our marker is kept. When only a shebang would remain,
/// the hook is reduced to a bare `#!/bin/sh`.
///
/// # Returns
///
/// `false` if there was no hook or it did not contain our block.
///
/// # Errors
///
/// Returns an I/O error if the hook cannot be read or written.
pub fn remove_hook(project_root: &Path) -> Result<bool> {
    let path = hook_path(project_root);
    if !path.exists() {
        return Ok(false);
    }

    let contents = fs::read_to_string(&path)?;
    let lines: Vec<&str> = contents.lines().collect();
    let Some(marker) = lines.iter().position(|l| l.trim() == HOOK_MARKER) else {
        return Ok(false);
    };

    let mut kept = lines[..marker].to_vec();
    // our own shebang, left behind when the block was appended
    if kept.len() > 1 && kept.last().map(|l| l.trim()) == Some(SHEBANG) {
        kept.pop();
    }

    let cleaned = kept.join("\n");
    let cleaned = cleaned.trim_end();
    if cleaned.len() <= SHEBANG.len() {
        fs::write(&path, format!("{}\n", SHEBANG))?;
    } else {
        fs::write(&path, format!("{}\n", cleaned))?;
    }

    debug!(path = %path.display(), "hook removed");
    Ok(true)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
