//! Sync status between the local env file and the lock file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use crate::core::{files, keystore};
use crate::error::{Error, ErrorKind, Result};

/// How the local env file relates to the lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Decrypted lock content matches the env file exactly.
    InSync,
    /// Contents differ and the env file was modified after the lock.
    LocalChanges,
    /// Contents differ and the lock file is at least as new as the env file.
    LockUpdated,
}

impl SyncState {
    /// Compare contents, falling back to modification times when they differ.
    pub fn compute(local: &str, locked: &str, env_modified: SystemTime, lock_modified: SystemTime) -> Self {
        if local == locked {
            Self::InSync
        } else if env_modified > lock_modified {
            Self::LocalChanges
        } else {
            Self::LockUpdated
        }
    }
}

/// Why a sync state could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Undetermined {
    /// The env file, lock file or key is missing.
    MissingFiles,
    /// The key file exists but is malformed.
    KeyMalformed,
    /// The lock file could not be decrypted with the local key.
    DecryptionFailed,
}

/// Presence and age of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub modified: Option<DateTime<Local>>,
}

impl FileStatus {
    fn probe(path: PathBuf) -> Self {
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);
        Self {
            exists: path.exists(),
            path,
            modified,
        }
    }
}

/// Full status of a project.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub key: FileStatus,
    pub env: FileStatus,
    pub lock: FileStatus,
    pub state: Option<SyncState>,
    pub undetermined: Option<Undetermined>,
}

impl Report {
    /// Inspect the key, env and lock files of a project.
    ///
    /// Key and decryption problems are reported in the result rather than as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an existing file cannot be read.
    pub fn collect(project_root: &Path, env_path: &Path, lock_path: &Path) -> Result<Self> {
        let key = FileStatus::probe(keystore::key_file_path(project_root));
        let env = FileStatus::probe(env_path.to_path_buf());
        let lock = FileStatus::probe(lock_path.to_path_buf());

        let mut report = Self {
            key,
            env,
            lock,
            state: None,
            undetermined: None,
        };

        if !(report.key.exists && report.env.exists && report.lock.exists) {
            report.undetermined = Some(Undetermined::MissingFiles);
            return Ok(report);
        }

        let master = match keystore::load_key(project_root) {
            Ok(master) => master,
            Err(e) if e.kind() == ErrorKind::KeyMalformed => {
                report.undetermined = Some(Undetermined::KeyMalformed);
                return Ok(report);
            }
            Err(e) => return Err(e),
        };

        let locked = match files::decrypt_to_string(lock_path, &master) {
            Ok(locked) => locked,
            Err(e) if is_unreadable_lock(&e) => {
                report.undetermined = Some(Undetermined::DecryptionFailed);
                return Ok(report);
            }
            Err(e) => return Err(e),
        };

        let local = fs::read_to_string(env_path)?;
        let state = SyncState::compute(
            &local,
            &locked,
            fs::metadata(env_path)?.modified()?,
            fs::metadata(lock_path)?.modified()?,
        );
        debug!(?state, "sync state computed");
        report.state = Some(state);

        Ok(report)
    }
}

fn is_unreadable_lock(e: &Error) -> bool {
    matches!(e.kind(), ErrorKind::BadFormat | ErrorKind::DecryptionFailed)
}

/// Whether `a` was modified more recently than `b`.
///
/// # Errors
///
/// Returns an I/O error if either file's metadata cannot be read.
pub fn is_newer(a: &Path, b: &Path) -> Result<bool> {
    let a = fs::metadata(a)?.modified()?;
    let b = fs::metadata(b)?.modified()?;
    Ok(a > b)
}
