//! Project configuration.
//!
//! An optional `.envsync.toml` in the project root overrides the default
//! file names:
//!
//! ```toml
//! [files]
//! env = ".env.development"
//! lock = ".env.development.locked"
//! ```
//!
//! Command-line flags and `ENVSYNC_*` environment variables take precedence
//! over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Error, Result};

/// Contents of `.envsync.toml`.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub files: Files,
}

/// The `[files]` section.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Files {
    /// Plaintext environment file, relative to the project root.
    pub env: Option<PathBuf>,
    /// Lock file, relative to the project root.
    pub lock: Option<PathBuf>,
}

impl Config {
    /// Path to the configuration file for a project.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(constants::CONFIG_FILE)
    }

    /// Load `.envsync.toml`, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file is not valid TOML or has
    /// unknown keys, and `Error::Other` if the configured paths are unusable.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::config_path(project_root);
        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    /// Resolve the plaintext env file path.
    pub fn env_path(&self, project_root: &Path, flag: Option<&Path>) -> PathBuf {
        let relative = flag
            .map(Path::to_path_buf)
            .or_else(|| self.files.env.clone())
            .unwrap_or_else(|| PathBuf::from(constants::ENV_FILE));
        project_root.join(relative)
    }

    /// Resolve the lock file path.
    pub fn lock_path(&self, project_root: &Path, flag: Option<&Path>) -> PathBuf {
        let relative = flag
            .map(Path::to_path_buf)
            .or_else(|| self.files.lock.clone())
            .unwrap_or_else(|| PathBuf::from(constants::LOCK_FILE));
        project_root.join(relative)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [("files.env", &self.files.env), ("files.lock", &self.files.lock)] {
            if matches!(value, Some(p) if p.as_os_str().is_empty()) {
                return Err(Error::Other(format!("{} in .envsync.toml is empty", field)));
            }
        }

        if self.files.env.is_some() && self.files.env == self.files.lock {
            return Err(Error::Other(
                "files.env and files.lock in .envsync.toml point to the same file".to_string(),
            ));
        }

        Ok(())
    }
}
