//! Tests for `envsync status` command.

use crate::support::*;

#[test]
fn test_status_in_sync() {
    let t = Test::locked(SAMPLE_ENV);

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "envsync status");
    assert_stdout_contains(&output, "Status: IN SYNC");
    assert_stdout_contains(&output, "found (modified ");
}

#[test]
fn test_status_local_changes() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "CHANGED=1\n");
    t.age(".env.locked", 60);

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "Status: LOCAL CHANGES");
    assert_stdout_contains(&output, "envsync lock");
}

#[test]
fn test_status_lock_updated() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "OLD=1\n");
    t.age(".env", 60);

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "Status: LOCK UPDATED");
    assert_stdout_contains(&output, "envsync unlock");
}

#[test]
fn test_status_missing_files() {
    let t = Test::new();

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "not found");
    assert_stdout_contains(&output, "cannot determine sync status");
}

#[test]
fn test_status_malformed_key() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".envsync.key", "zz\n");

    let output = t.status();
    assert_success(&output);
    assert_stderr_contains(&output, "key is malformed");
}

#[test]
fn test_status_wrong_key() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".envsync.key", format!("{}\n", "ef".repeat(32)));

    let output = t.status();
    assert_success(&output);
    assert_stderr_contains(&output, "decryption failed");
}

#[test]
fn test_status_json() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", "CHANGED=1\n");
    t.age(".env.locked", 60);

    let output = t.status_json();
    assert_success(&output);

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["state"], "local_changes");
    assert_eq!(report["key"]["exists"], true);
    assert_eq!(report["env"]["exists"], true);
    assert!(report["lock"]["modified"].is_string());
    assert!(report["undetermined"].is_null());
}

#[test]
fn test_status_json_missing_files() {
    let t = Test::new();

    let output = t.status_json();
    assert_success(&output);

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(report["state"].is_null());
    assert_eq!(report["undetermined"], "missing_files");
    assert_eq!(report["key"]["exists"], false);
}
