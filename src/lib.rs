//! envsync - share encrypted `.env` files through git.
//!
//! One team member encrypts the project's `.env` with a shared key into
//! `.env.locked`, which is committed; teammates holding the key decrypt it
//! locally.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Key, .gitignore and hook setup
//! │   ├── lock          # Encrypt .env -> .env.locked
//! │   ├── unlock        # Decrypt .env.locked -> .env
//! │   ├── diff          # Redacted diff of local vs locked
//! │   ├── status        # Sync status report
//! │   ├── hook          # post-merge hook management
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── keystore      # Master key generation and loading
//!     ├── cipher/       # Lock codec
//!     │   ├── mod       # LockCodec, encrypt/decrypt
//!     │   ├── envelope  # Binary envelope layout
//!     │   └── kdf       # Kdf trait, scrypt
//!     ├── files         # File-level lock/unlock
//!     ├── config        # .envsync.toml
//!     ├── gitignore     # .gitignore entries
//!     ├── hooks         # git post-merge hook
//!     ├── diff          # Line diff with value redaction
//!     └── status        # Sync state
//! ```
//!
//! # Lock file format
//!
//! ```text
//! "ENVSYNC1" (8) | salt (32) | iv (16) | tag (16) | ciphertext
//! ```
//!
//! The file key is derived per lock with scrypt (N=2^14, r=8, p=1) from the
//! master key and salt, and the payload is sealed with AES-256-GCM.
//!
//! # Example
//!
//! ```no_run
//! use envsync::core::{cipher, keystore};
//! use std::path::Path;
//!
//! let key = keystore::load_key(Path::new("."))?;
//! let locked = cipher::encrypt("API_KEY=secret\n", &key)?;
//! assert_eq!(cipher::decrypt(&locked, &key)?, "API_KEY=secret\n");
//! # Ok::<(), envsync::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
