//! Tests for `envsync hook` command.

use crate::support::*;

#[test]
fn test_hook_install_and_remove() {
    let t = Test::repo();

    let output = t.hook("install");
    assert_success(&output);
    assert_stdout_contains(&output, "post-merge hook installed");
    assert!(t.read(".git/hooks/post-merge").contains("# envsync-hook"));

    let output = t.hook("install");
    assert_stdout_contains(&output, "already installed");

    let output = t.hook("remove");
    assert_success(&output);
    assert_stdout_contains(&output, "post-merge hook removed");
    assert_eq!(t.read(".git/hooks/post-merge"), "#!/bin/sh\n");
}

#[test]
fn test_hook_preserves_existing_hook() {
    let t = Test::repo();
    t.write(".git/hooks/post-merge", "#!/bin/sh\nmake deps\n");

    let output = t.hook("install");
    assert_success(&output);
    assert_stdout_contains(&output, "post-merge hook updated");

    assert_success(&t.hook("remove"));
    assert_eq!(t.read(".git/hooks/post-merge"), "#!/bin/sh\nmake deps\n");
}

#[test]
fn test_hook_remove_without_hook() {
    let t = Test::repo();

    let output = t.hook("remove");
    assert_success(&output);
    assert_stdout_contains(&output, "no envsync post-merge hook");
}

#[test]
fn test_hook_install_outside_repository() {
    let t = Test::new();

    let output = t.hook("install");
    assert_failure(&output);
    assert_stderr_contains(&output, "is this a git repository");
}

#[cfg(unix)]
#[test]
fn test_hook_restores_configured_env_file() {
    let t = Test::repo();
    t.write(
        ".envsync.toml",
        "[files]\nenv = \".env.dev\"\nlock = \"dev.locked\"\n",
    );
    assert_success(&t.init_cmd());
    t.write(".env.dev", SAMPLE_ENV);
    assert_success(&t.lock());
    std::fs::remove_file(t.path(".env.dev")).unwrap();

    let output = t.run_hook();
    assert_success(&output);
    assert_stdout_contains(&output, "envsync: updating from dev.locked");
    assert_stdout_contains(&output, ".env.dev updated.");
    assert_eq!(t.read(".env.dev"), SAMPLE_ENV);
}

#[cfg(unix)]
#[test]
fn test_hook_without_lock_file_does_nothing() {
    let t = Test::init();

    let output = t.run_hook();
    assert_success(&output);
    assert_eq!(stdout(&output), "");
    assert!(!t.exists(".env"));
}

#[test]
fn test_hook_install_follows_moved_lock() {
    let t = Test::init();
    assert!(t.read(".git/hooks/post-merge").contains("envsync_lock='.env.locked'"));

    t.write(".envsync.toml", "[files]\nlock = \"secrets.locked\"\n");
    let output = t.hook("install");
    assert_success(&output);
    assert_stdout_contains(&output, "post-merge hook updated");

    let hook = t.read(".git/hooks/post-merge");
    assert!(hook.contains("envsync_lock='secrets.locked'"));
    assert_eq!(hook.matches("# envsync-hook").count(), 1);
}
