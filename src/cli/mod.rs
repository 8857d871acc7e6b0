//! Command-line interface.

pub mod completions;
pub mod diff;
pub mod hook;
pub mod init;
pub mod lock;
pub mod output;
pub mod status;
pub mod unlock;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;

/// envsync - Safely encrypt and sync .env files across your team using git.
#[derive(Parser)]
#[command(
    name = "envsync",
    about = "Safely encrypt and sync .env files across your team using git",
    version,
    after_help = "Workflow:\n  \
        1. envsync init     first-time setup (key, .gitignore, git hook)\n  \
        2. envsync lock     encrypt .env -> .env.locked (commit this)\n  \
        3. envsync unlock   decrypt .env.locked -> .env (teammates run this)\n  \
        4. envsync diff     see what changed\n  \
        5. envsync status   check if you're in sync"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Set up envsync in this project (generate key, update .gitignore, install git hook)
    Init,

    /// Encrypt .env -> .env.locked
    Lock {
        /// Path to .env file
        #[arg(long, env = "ENVSYNC_ENV_FILE")]
        env: Option<PathBuf>,
        /// Path to output lock file
        #[arg(long, env = "ENVSYNC_LOCK_FILE")]
        out: Option<PathBuf>,
        /// Suppress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Decrypt .env.locked -> .env
    Unlock {
        /// Path to output .env file
        #[arg(long, env = "ENVSYNC_ENV_FILE")]
        env: Option<PathBuf>,
        /// Path to lock file
        #[arg(long, env = "ENVSYNC_LOCK_FILE")]
        lockfile: Option<PathBuf>,
        /// Suppress output
        #[arg(short, long)]
        quiet: bool,
        /// Overwrite .env even if it is newer than .env.locked
        #[arg(short, long)]
        force: bool,
    },

    /// Show differences between local .env and .env.locked
    Diff {
        /// Path to .env file
        #[arg(long, env = "ENVSYNC_ENV_FILE")]
        env: Option<PathBuf>,
        /// Path to lock file
        #[arg(long, env = "ENVSYNC_LOCK_FILE")]
        lockfile: Option<PathBuf>,
        /// Show output in unified patch format
        #[arg(short, long)]
        unified: bool,
    },

    /// Show sync status: in sync, local changes, or lock updated
    Status {
        /// Path to .env file
        #[arg(long, env = "ENVSYNC_ENV_FILE")]
        env: Option<PathBuf>,
        /// Path to lock file
        #[arg(long, env = "ENVSYNC_LOCK_FILE")]
        lockfile: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the git post-merge hook
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Hook subcommands.
#[derive(Subcommand)]
pub enum HookAction {
    /// Install the post-merge hook that unlocks after git pull
    Install,
    /// Remove the envsync block from the post-merge hook
    Remove,
}

/// Execute a command in the current directory.
pub fn execute(command: Command) -> Result<()> {
    use Command::*;

    let root = std::env::current_dir()?;

    match command {
        Init => init::execute(&root),
        Lock { env, out, quiet } => lock::execute(&root, env, out, quiet),
        Unlock {
            env,
            lockfile,
            quiet,
            force,
        } => unlock::execute(&root, env, lockfile, quiet, force),
        Diff {
            env,
            lockfile,
            unified,
        } => diff::execute(&root, env, lockfile, unified),
        Status {
            env,
            lockfile,
            json,
        } => status::execute(&root, env, lockfile, json),
        Hook { action } => match action {
            HookAction::Install => hook::install(&root),
            HookAction::Remove => hook::remove(&root),
        },
        Completions { shell } => completions::execute(shell),
    }
}

/// Render `path` relative to the project root when it lies inside it.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
