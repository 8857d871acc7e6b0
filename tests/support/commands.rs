//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create an envsync command running in the project directory.
    ///
    /// Colors are disabled and `ENVSYNC_*` variables from the outer
    /// environment are cleared.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envsync").expect("failed to find envsync binary");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("ENVSYNC_LOG");
        cmd.env_remove("ENVSYNC_ENV_FILE");
        cmd.env_remove("ENVSYNC_LOCK_FILE");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envsync init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run envsync init")
    }

    /// Shortcut for `envsync lock`.
    pub fn lock(&self) -> Output {
        self.cmd()
            .arg("lock")
            .output()
            .expect("failed to run envsync lock")
    }

    /// Shortcut for `envsync unlock`.
    pub fn unlock(&self) -> Output {
        self.cmd()
            .arg("unlock")
            .output()
            .expect("failed to run envsync unlock")
    }

    /// Shortcut for `envsync unlock --force`.
    pub fn unlock_force(&self) -> Output {
        self.cmd()
            .args(["unlock", "--force"])
            .output()
            .expect("failed to run envsync unlock --force")
    }

    /// Shortcut for `envsync diff`.
    pub fn diff(&self) -> Output {
        self.cmd()
            .arg("diff")
            .output()
            .expect("failed to run envsync diff")
    }

    /// Shortcut for `envsync diff --unified`.
    pub fn diff_unified(&self) -> Output {
        self.cmd()
            .args(["diff", "--unified"])
            .output()
            .expect("failed to run envsync diff --unified")
    }

    /// Shortcut for `envsync status`.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run envsync status")
    }

    /// Shortcut for `envsync status --json`.
    pub fn status_json(&self) -> Output {
        self.cmd()
            .args(["status", "--json"])
            .output()
            .expect("failed to run envsync status --json")
    }

    /// Shortcut for `envsync hook <action>`.
    pub fn hook(&self, action: &str) -> Output {
        self.cmd()
            .args(["hook", action])
            .output()
            .expect("failed to run envsync hook")
    }

    /// Run the installed post-merge hook with `sh`, as git would after a pull.
    ///
    /// The envsync binary under test is first on `PATH`.
    pub fn run_hook(&self) -> Output {
        let bin_dir = Path::new(env!("CARGO_BIN_EXE_envsync"))
            .parent()
            .expect("binary has no parent directory")
            .to_path_buf();
        let outer = std::env::var_os("PATH").unwrap_or_default();
        let path = std::env::join_paths(
            std::iter::once(bin_dir).chain(std::env::split_paths(&outer)),
        )
        .expect("failed to build PATH");

        std::process::Command::new("sh")
            .arg(".git/hooks/post-merge")
            .current_dir(self.dir.path())
            .env("PATH", path)
            .env("NO_COLOR", "1")
            .env_remove("ENVSYNC_LOG")
            .env_remove("ENVSYNC_ENV_FILE")
            .env_remove("ENVSYNC_LOCK_FILE")
            .output()
            .expect("failed to run post-merge hook")
    }
}
