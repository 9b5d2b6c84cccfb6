//! Tests for `untold init` and default environment resolution.

use crate::support::*;
use std::fs;

#[test]
fn test_init_writes_config_and_gitignore() {
    let t = Test::new();

    let output = t.init();
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    let config = t.read(".untold.toml");
    assert!(config.contains("[untold]"));
    assert!(config.contains("version"));
    assert!(config.contains("default_environment = \"development\""));

    let gitignore = t.read(".gitignore");
    assert!(gitignore.lines().any(|l| l == "*.private"));
    assert!(gitignore.lines().any(|l| l == "*.private.next"));
}

#[test]
fn test_init_keeps_existing_gitignore_entries() {
    let t = Test::new();
    fs::write(t.path(".gitignore"), "target/\n*.private\n").unwrap();

    assert_success(&t.init());

    assert_eq!(t.read(".gitignore"), "target/\n*.private\n*.private.next\n");
}

#[test]
fn test_init_twice_fails() {
    let t = Test::new();
    assert_success(&t.init());

    let output = t.init();
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "already initialized");
}

#[test]
fn test_init_rejects_invalid_default_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["init", "--default-env", "../escape"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert!(!t.path(".untold.toml").exists());
}

#[test]
fn test_default_environment_used_with_warning() {
    let t = Test::new();

    let output = t.cmd().arg("create-vault").output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "no environment provided");
    assert_stderr_contains(&output, "\"development\"");
    assert!(t.path("development.public").exists());
    assert!(t.path("development").is_dir());
}

#[test]
fn test_configured_default_environment() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["init", "--default-env", "staging"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t.cmd().arg("create-vault").output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "\"staging\"");
    assert!(t.path("staging.public").exists());
    assert!(!t.path("development.public").exists());
}

#[test]
fn test_explicit_env_does_not_warn() {
    let t = Test::new();

    let output = t.create_vault("prod");
    assert_success(&output);
    assert!(!stderr(&output).contains("no environment provided"));
}

#[test]
fn test_invalid_environment_name_rejected() {
    let t = Test::new();

    for bad in ["..", "a/b"] {
        let output = t.create_vault(bad);
        assert_exit_code(&output, EXIT_USAGE);
        assert_stderr_contains(&output, "invalid environment name");
    }
}
