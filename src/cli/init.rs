//! Init command - key, .gitignore and git hook setup.

use std::path::Path;

use tracing::{debug, info};

use crate::cli::{display_path, output};
use crate::core::hooks::HookStatus;
use crate::core::{config::Config, gitignore, hooks, keystore};
use crate::error::Result;

/// Initialize envsync in a project.
///
/// An existing key is never replaced; delete it first to rotate.
pub fn execute(root: &Path) -> Result<()> {
    output::header("envsync init");
    println!();

    let config = Config::load(root)?;
    let env_path = config.env_path(root, None);
    let lock_path = config.lock_path(root, None);
    let env_name = display_path(root, &env_path);
    let lock_name = display_path(root, &lock_path);

    let key_path = keystore::key_file_path(root);
    if keystore::has_key(root) {
        output::warn(&format!(
            "key file already exists: {}",
            output::path(key_path.display())
        ));
        output::dimmed("  delete it first to rotate.");
    } else {
        keystore::generate_key(root)?;
        info!(path = %key_path.display(), "key generated");
        output::success(&format!("key generated: {}", output::path(key_path.display())));
        output::dimmed("  share with teammates via a password manager. never commit it.");
    }
    println!();

    let update = gitignore::update_gitignore(root, &lock_path)?;
    if update.added.is_empty() {
        output::warn(".gitignore already up to date.");
    } else {
        output::success(".gitignore updated - added:");
        for entry in &update.added {
            output::list_item(entry);
        }
    }
    if !update.skipped.is_empty() {
        output::dimmed(&format!(
            "  skipped (already present): {}",
            update.skipped.join(", ")
        ));
    }
    println!();

    match hooks::install_hook(root, &lock_path) {
        Ok(install) => {
            let msg = format!(
                "post-merge hook {}: {}",
                install.status.as_str(),
                output::path(display_path(root, &install.path))
            );
            if install.status == HookStatus::Skipped {
                output::warn(&msg);
            } else {
                output::success(&msg);
            }
            output::dimmed(&format!(
                "  {} will auto-update after git pull if {} is present.",
                env_name, lock_name
            ));
        }
        Err(e) => {
            debug!("hook not installed: {}", e);
            output::warn(&format!("skipped git hook: {}", e));
        }
    }
    println!();

    output::header("next steps:");
    if !env_path.exists() {
        output::dimmed(&format!("  create a {} file, then run:", env_name));
    }
    println!(
        "  {}    - encrypt {} into {}",
        output::cmd("envsync lock"),
        env_name,
        lock_name
    );
    println!("  {}  - check sync status", output::cmd("envsync status"));
    println!("  {}    - see what changed", output::cmd("envsync diff"));

    Ok(())
}
