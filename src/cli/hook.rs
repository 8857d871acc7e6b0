//! Hook command - manage the git post-merge hook.

use std::path::Path;

use crate::cli::{display_path, output};
use crate::core::config::Config;
use crate::core::hooks::{self, HookStatus};
use crate::error::Result;

/// Install the post-merge hook for the configured lock file.
pub fn install(root: &Path) -> Result<()> {
    let lock_path = Config::load(root)?.lock_path(root, None);
    let install = hooks::install_hook(root, &lock_path)?;
    let path = output::path(display_path(root, &install.path));

    match install.status {
        HookStatus::Skipped => output::warn(&format!("post-merge hook already installed: {}", path)),
        status => output::success(&format!("post-merge hook {}: {}", status.as_str(), path)),
    }
    Ok(())
}

/// Remove the envsync block from the post-merge hook.
pub fn remove(root: &Path) -> Result<()> {
    if hooks::remove_hook(root)? {
        output::success("post-merge hook removed");
    } else {
        output::dimmed("no envsync post-merge hook installed");
    }
    Ok(())
}
