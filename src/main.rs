//! envsync - Safely encrypt and sync .env files across your team using git.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envsync::cli::output;
use envsync::cli::{execute, Cli, Command};
use envsync::error::{Error, ErrorKind, LockError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ENVSYNC_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envsync=debug")
        } else {
            EnvFilter::new("envsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let locking = matches!(cli.command, Command::Lock { .. });

    if let Err(e) = execute(cli.command) {
        let suggestion = match (&e, e.kind()) {
            (_, ErrorKind::KeyNotFound) => {
                Some("run 'envsync init' first, or copy the team key to this location")
            }
            (_, ErrorKind::KeyMalformed) => Some("copy the team key again"),
            (_, ErrorKind::SourceFileNotFound) if locking => {
                Some("create the .env file first, or pass --env")
            }
            (_, ErrorKind::SourceFileNotFound) => Some("run 'envsync lock' first"),
            (_, ErrorKind::BadFormat | ErrorKind::DecryptionFailed) => {
                Some("check that .envsync.key matches your team's key")
            }
            (Error::Lock(LockError::EnvNewer { .. }), _) => {
                Some("use --force to overwrite, or run 'envsync lock' first")
            }
            (Error::Hook(_), _) => Some("run: git init"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
