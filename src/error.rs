//! Error types for envsync.
//!
//! Errors are grouped by the component that raises them. The top-level
//! [`Error`] wraps each group so callers can either match on the nested
//! enums or branch on the flat [`ErrorKind`].

use std::path::PathBuf;

use thiserror::Error;

/// Master key errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("no key file found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("key file {} is malformed: expected 64 hex chars", path.display())]
    Malformed { path: PathBuf },

    #[error("failed to generate key: {0}")]
    GenerationFailed(String),

    #[error("failed to read key file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write key file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Lock file errors.
#[derive(Error, Debug)]
pub enum LockError {
    #[error("source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("lock file is not a valid envsync file or is corrupted (bad magic bytes)")]
    BadFormat,

    #[error("decryption failed: wrong key, or the lock file has been tampered with")]
    DecryptionFailed,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("{} is newer than the lock file and may have uncommitted changes", path.display())]
    EnvNewer { path: PathBuf },
}

/// Git hook errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("no .git/hooks directory found in {}: is this a git repository?", root.display())]
    NotARepository { root: PathBuf },
}

/// Project configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("invalid .envsync.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat classification of [`Error`] for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    KeyNotFound,
    KeyMalformed,
    SourceFileNotFound,
    BadFormat,
    DecryptionFailed,
    Other,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Key(KeyError::NotFound { .. }) => ErrorKind::KeyNotFound,
            Error::Key(KeyError::Malformed { .. }) => ErrorKind::KeyMalformed,
            Error::Lock(LockError::SourceNotFound { .. }) => ErrorKind::SourceFileNotFound,
            Error::Lock(LockError::BadFormat) => ErrorKind::BadFormat,
            Error::Lock(LockError::DecryptionFailed) => ErrorKind::DecryptionFailed,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
