//! Tests for `envsync diff` command.

use crate::support::*;

#[test]
fn test_diff_in_sync() {
    let t = Test::locked(SAMPLE_ENV);

    let output = t.diff();
    assert_success(&output);
    assert_stdout_contains(&output, "In sync");
}

#[test]
fn test_diff_inline_is_redacted() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(
        ".env",
        SAMPLE_ENV.replace("API_KEY=sk-test-12345", "API_KEY=sk-live-99999") + "NEW_TOKEN=abc\n",
    );

    let output = t.diff();
    assert_success(&output);
    assert_stdout_contains(&output, "  - API_KEY=sk***");
    assert_stdout_contains(&output, "  + API_KEY=sk***");
    assert_stdout_contains(&output, "  + NEW_TOKEN=***");
    assert_stdout_contains(&output, "    PORT=***");
    assert_stdout_contains(&output, "Summary: +2 added -1 removed");
    assert_output_excludes(&output, "sk-test-12345");
    assert_output_excludes(&output, "sk-live-99999");
}

#[test]
fn test_diff_unified() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".env", SAMPLE_ENV.replace("PORT=8080", "PORT=9090"));

    let output = t.diff_unified();
    assert_success(&output);
    assert_stdout_contains(&output, "--- .env.locked");
    assert_stdout_contains(&output, "+++ .env (local)");
    assert_stdout_contains(&output, "@@ -1,3 +1,3 @@");
    assert_stdout_contains(&output, "-PORT=***");
    assert_stdout_contains(&output, "+PORT=***");
    assert_output_excludes(&output, "postgres://localhost/mydb");
}

#[test]
fn test_diff_without_any_files() {
    let t = Test::new();

    let output = t.diff();
    assert_success(&output);
    assert_stdout_contains(&output, "Neither .env nor .env.locked found");
}

#[test]
fn test_diff_without_lock() {
    let t = Test::init();
    t.write(".env", SAMPLE_ENV);

    let output = t.diff();
    assert_success(&output);
    assert_stdout_contains(&output, "nothing to compare against");
}

#[test]
fn test_diff_without_env() {
    let t = Test::locked(SAMPLE_ENV);
    std::fs::remove_file(t.path(".env")).unwrap();

    let output = t.diff();
    assert_success(&output);
    assert_stdout_contains(&output, ".env not found locally");
    assert_stdout_contains(&output, "envsync unlock");
}

#[test]
fn test_diff_wrong_key() {
    let t = Test::locked(SAMPLE_ENV);
    t.write(".envsync.key", format!("{}\n", "cd".repeat(32)));

    let output = t.diff();
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
}
