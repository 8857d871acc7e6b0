//! Tests for `envsync unlock` command.

use crate::support::*;

#[test]
fn test_unlock_restores_env() {
    let t = Test::locked(SAMPLE_ENV_COMPLEX);
    std::fs::remove_file(t.path(".env")).unwrap();

    let output = t.unlock();
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted: .env.locked -> .env");
    assert_eq!(t.read(".env"), SAMPLE_ENV_COMPLEX);
}

#[cfg(unix)]
#[test]
fn test_unlock_writes_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::locked(SAMPLE_ENV);
    std::fs::remove_file(t.path(".env")).unwrap();

    assert_success(&t.unlock());
    let mode = std::fs::metadata(t.path(".env"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_unlock_quiet() {
    let t = Test::locked(SAMPLE_ENV);
    std::fs::remove_file(t.path(".env")).unwrap();

    let output = t.cmd().args(["unlock", "-q"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), ".env updated.\n");
}

#[test]
fn test_unlock_refuses_newer_env() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "LOCAL=edit\n");
    t.age(".env.locked", 60);

    let output = t.unlock();
    assert_failure(&output);
    assert_stderr_contains(&output, "newer than the lock file");
    assert_stdout_contains(&output, "--force");
    assert_eq!(t.read(".env"), "LOCAL=edit\n");
}

#[test]
fn test_unlock_force_overwrites() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "LOCAL=edit\n");
    t.age(".env.locked", 60);

    let output = t.unlock_force();
    assert_success(&output);
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_unlock_overwrites_older_env() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "STALE=1\n");
    t.age(".env", 60);

    assert_success(&t.unlock());
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_unlock_missing_lock() {
    let t = Test::init();

    let output = t.unlock();
    assert_failure(&output);
    assert_stderr_contains(&output, ".env.locked");
    assert_stdout_contains(&output, "envsync lock");
}

#[test]
fn test_unlock_wrong_key() {
    let t = Test::locked(SAMPLE_ENV);
    std::fs::remove_file(t.path(".env")).unwrap();
    t.write(".envsync.key", format!("{}\n", "ab".repeat(32)));

    let output = t.unlock();
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
    assert!(!t.exists(".env"));
}

#[test]
fn test_unlock_tampered_lock() {
    let t = Test::locked(SAMPLE_ENV);
    std::fs::remove_file(t.path(".env")).unwrap();

    let mut locked = t.read_bytes(".env.locked");
    let last = locked.len() - 1;
    locked[last] ^= 0x01;
    t.write(".env.locked", locked);

    let output = t.unlock();
    assert_failure(&output);
    assert_stderr_contains(&output, "tampered");
    assert!(!t.exists(".env"));
}

#[test]
fn test_unlock_not_a_lock_file() {
    let t = Test::init();
    t.write(".env.locked", "abcde");

    let output = t.unlock();
    assert_failure(&output);
    assert_stderr_contains(&output, "not a valid envsync file");
}

#[test]
fn test_unlock_known_lock_file() {
    let t = Test::new();
    t.write(".envsync.key", ZERO_KEY_FILE);
    t.write(".env.locked", hex::decode(ZERO_KEY_LOCK_HEX).unwrap());

    let output = t.unlock();
    assert_success(&output);
    assert_eq!(t.read(".env"), "FOO=bar\n");
}

#[test]
fn test_lock_unlock_between_teammates() {
    let alice = Test::locked(SAMPLE_ENV);
    let bob = Test::new();
    bob.write(".envsync.key", alice.read(".envsync.key"));
    bob.write(".env.locked", alice.read_bytes(".env.locked"));

    assert_success(&bob.unlock());
    assert_eq!(bob.read(".env"), SAMPLE_ENV);
}
