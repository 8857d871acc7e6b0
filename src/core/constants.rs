//! Constants used throughout envsync.
//!
//! Centralizes file names and the lock file format. Everything that affects
//! the on-disk format lives here so it cannot drift between encrypt and
//! decrypt.

/// Master key file name, relative to the project root.
pub const KEY_FILE: &str = ".envsync.key";

/// Default plaintext environment file.
pub const ENV_FILE: &str = ".env";

/// Default lock file.
pub const LOCK_FILE: &str = ".env.locked";

/// Optional project configuration file.
pub const CONFIG_FILE: &str = ".envsync.toml";

/// Master and derived key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// Magic header identifying a lock file.
pub const MAGIC: &[u8; 8] = b"ENVSYNC1";

/// Per-lock scrypt salt length.
pub const SALT_LENGTH: usize = 32;

/// AES-GCM nonce length.
pub const IV_LENGTH: usize = 16;

/// AES-GCM authentication tag length.
pub const AUTH_TAG_LENGTH: usize = 16;

/// Size of the fixed header preceding the ciphertext.
pub const HEADER_LENGTH: usize = MAGIC.len() + SALT_LENGTH + IV_LENGTH + AUTH_TAG_LENGTH;

/// scrypt cost, as log2(N). N = 16384.
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size.
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelism.
pub const SCRYPT_P: u32 = 1;

/// Marker line identifying the envsync block inside a git hook.
pub const HOOK_MARKER: &str = "# envsync-hook";

/// Gitignore entries protecting local secrets.
///
/// The leading comment is always written with a new section; the remaining
/// entries are only appended when missing.
pub const GITIGNORE_ENTRIES: &[&str] = &[
    "# envsync - local secrets (never commit these)",
    ".env",
    ".env.*",
    "!.env.example",
    "!.env.locked",
    ".envsync.key",
];
