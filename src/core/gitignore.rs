//! `.gitignore` maintenance.
//!
//! Makes sure plaintext env files and the master key stay out of git while
//! the lock file is committed.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::constants::{ENV_FILE, GITIGNORE_ENTRIES, LOCK_FILE};
use crate::error::Result;

/// Outcome of [`update_gitignore`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitignoreUpdate {
    /// Entries appended to the file.
    pub added: Vec<String>,
    /// Entries that were already present.
    pub skipped: Vec<String>,
}

/// Append any missing envsync entries to the project's `.gitignore`.
///
/// Existing lines are compared after trimming. Missing entries are written as
/// one new section headed by a comment. The file is left untouched when
/// nothing is missing.
///
/// A lock file at a custom path that the `.env` patterns would swallow gets
/// its own negation entry so it can still be committed.
///
/// # Errors
///
/// Returns an I/O error if `.gitignore` cannot be read or written.
pub fn update_gitignore(project_root: &Path, lock_path: &Path) -> Result<GitignoreUpdate> {
    let path = project_root.join(".gitignore");
    let existing = if path.exists() {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };

    let mut entries: Vec<String> = GITIGNORE_ENTRIES.iter().map(|e| e.to_string()).collect();
    if let Some(negation) =
        lock_negation(project_root, lock_path).filter(|n| !entries.contains(n))
    {
        debug!(entry = %negation, "lock file needs its own negation");
        entries.push(negation);
    }

    let mut update = GitignoreUpdate::default();
    let mut section = Vec::new();

    for entry in entries {
        if entry.starts_with('#') {
            section.push(entry);
        } else if existing.lines().any(|l| l.trim() == entry) {
            update.skipped.push(entry);
        } else {
            update.added.push(entry.clone());
            section.push(entry);
        }
    }

    if update.added.is_empty() {
        debug!("gitignore already up to date");
        return Ok(update);
    }

    let mut contents = existing;
    if !contents.is_empty() {
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push('\n');
    }
    for line in section {
        contents.push_str(&line);
        contents.push('\n');
    }

    fs::write(&path, contents)?;
    debug!(added = update.added.len(), "gitignore updated");

    Ok(update)
}

/// `!<lock>` when `.env` or `.env.*` would ignore the lock file and the
/// default `!.env.locked` does not cover it.
fn lock_negation(project_root: &Path, lock_path: &Path) -> Option<String> {
    let relative = lock_path.strip_prefix(project_root).ok()?;
    let name = relative.file_name()?.to_str()?;

    let ignored = name == ENV_FILE || name.starts_with(&format!("{}.", ENV_FILE));
    if !ignored || name == LOCK_FILE {
        return None;
    }

    let parts: Option<Vec<&str>> = relative.iter().map(|c| c.to_str()).collect();
    Some(format!("!{}", parts?.join("/")))
}

/// Whether `file` is matched by a plain pattern in the project's `.gitignore`.
///
/// Only exact names and trailing path components are recognised; negated
/// patterns never match.
///
/// # Errors
///
/// Returns an I/O error if `.gitignore` exists but cannot be read.
pub fn is_gitignored(project_root: &Path, file: &str) -> Result<bool> {
    let path = project_root.join(".gitignore");
    if !path.exists() {
        return Ok(false);
    }

    let contents = fs::read_to_string(&path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('!'))
        .any(|pattern| file == pattern || file.ends_with(&format!("/{}", pattern))))
}
