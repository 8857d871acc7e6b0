//! Test support utilities for envsync integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// Child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create an empty project (not a git repository).
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a project with an empty `.git/hooks` directory.
    pub fn repo() -> Self {
        let t = Self::new();
        fs::create_dir_all(t.path(".git/hooks")).expect("failed to create .git/hooks");
        t
    }

    /// Create a project that has run `envsync init`.
    pub fn init() -> Self {
        let t = Self::repo();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create an initialized project with `.env` written and locked.
    pub fn locked(env: &str) -> Self {
        let t = Self::init();
        t.write(".env", env);
        let output = t.lock();
        assert!(
            output.status.success(),
            "Failed to lock: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Absolute path of a file inside the project.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        fs::write(self.path(name), contents).expect("failed to write file");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read file")
    }

    pub fn read_bytes(&self, name: &str) -> Vec<u8> {
        fs::read(self.path(name)).expect("failed to read file")
    }

    /// Set a file's modification time `secs` seconds in the past.
    pub fn age(&self, name: &str, secs: u64) {
        let time = SystemTime::now() - Duration::from_secs(secs);
        File::options()
            .write(true)
            .open(self.path(name))
            .and_then(|f| f.set_modified(time))
            .expect("failed to set mtime");
    }
}
