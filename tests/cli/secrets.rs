//! Tests for `untold add-secret`, `show-secret` and `change-secret`.

use crate::support::*;
use std::fs;

// Basic secret operations

#[test]
fn test_add_and_show_roundtrip() {
    let t = Test::with_vault("prod");

    let output = t.add("prod", "db-password", "s3cr3t");
    assert_success(&output);
    assert_stdout_contains(&output, "db-password");
    assert_stdout_excludes(&output, "s3cr3t");

    assert_shows(&t, "prod", "db-password", "s3cr3t");
}

#[test]
fn test_add_stores_sealed_text_under_address() {
    let t = Test::with_vault("prod");
    assert_success(&t.add("prod", "db-password", "s3cr3t"));

    let files: Vec<_> = fs::read_dir(t.path("prod"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec![address_of("db-password")]);

    let stored = fs::read_to_string(t.secret_path("prod", "db-password")).unwrap();
    assert!(!stored.contains("s3cr3t"));
    assert!(!stored.contains("db-password"));
}

#[test]
fn test_values_preserved_exactly() {
    let t = Test::with_vault("prod");
    let values = [
        ("spaces", "hello world  with  spaces"),
        ("symbols", "p@ssw0rd!#$%^&*()"),
        ("unicode", "pässwörd-🔑"),
        ("url", "postgres://user:pw@host:5432/db?sslmode=require"),
    ];

    for (name, value) in values {
        assert_success(&t.add("prod", name, value));
    }
    for (name, value) in values {
        assert_shows(&t, "prod", name, value);
    }
}

#[test]
fn test_add_needs_only_public_key() {
    let t = Test::with_vault("prod");
    let private = t.read("prod.private");
    fs::remove_file(t.path("prod.private")).unwrap();

    assert_success(&t.add("prod", "db-password", "s3cr3t"));

    let output = t.show_with_key("prod", &private, "db-password");
    assert_success(&output);
    assert_eq!(stdout(&output), "s3cr3t\n");
}

#[test]
fn test_env_var_selects_environment() {
    let t = Test::with_vault("staging");

    let output = t
        .cmd()
        .env("UNTOLD_ENV", "staging")
        .args(["add-secret", "api-key"])
        .write_stdin("from-env\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.secret_path("staging", "api-key").exists());
    assert_shows(&t, "staging", "api-key", "from-env");
}

// Add refusals

#[test]
fn test_add_existing_secret_fails_unchanged() {
    let t = Test::with_secrets("prod", &[("db-password", "original")]);
    let before = fs::read(t.secret_path("prod", "db-password")).unwrap();

    let output = t.add("prod", "db-password", "replacement");
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "already exists");
    assert_stderr_contains(&output, "untold change-secret");

    assert_eq!(fs::read(t.secret_path("prod", "db-password")).unwrap(), before);
    assert_shows(&t, "prod", "db-password", "original");
}

#[test]
fn test_add_empty_value_rejected() {
    let t = Test::with_vault("prod");

    let output = t
        .cmd()
        .args(["add-secret", "--env", "prod", "db-password"])
        .write_stdin("\n")
        .output()
        .unwrap();
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "cannot be empty");
    assert!(!t.secret_path("prod", "db-password").exists());
}

#[test]
fn test_add_without_name_is_usage_error() {
    let t = Test::with_vault("prod");

    let output = t
        .cmd()
        .args(["add-secret", "--env", "prod"])
        .write_stdin("value\n")
        .output()
        .unwrap();
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "\"name\" is required");
}

#[test]
fn test_add_without_vault_fails() {
    let t = Test::new();

    let output = t.add("prod", "db-password", "s3cr3t");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "untold create-vault --env prod");
    assert!(!t.path("prod").exists());
}

// Change

#[test]
fn test_change_replaces_value() {
    let t = Test::with_secrets("prod", &[("db-password", "old-value")]);
    let before = fs::read(t.secret_path("prod", "db-password")).unwrap();

    let output = t.change("prod", "db-password", "new-value");
    assert_success(&output);
    assert_stdout_contains(&output, "changed");

    assert_ne!(fs::read(t.secret_path("prod", "db-password")).unwrap(), before);
    assert_shows(&t, "prod", "db-password", "new-value");
}

#[test]
fn test_change_missing_secret_fails() {
    let t = Test::with_vault("prod");

    let output = t.change("prod", "nope", "value");
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "not found");
    assert_stderr_contains(&output, "untold add-secret");
    assert!(!t.secret_path("prod", "nope").exists());
}

// Show

#[test]
fn test_show_missing_secret_fails() {
    let t = Test::with_vault("prod");

    let output = t.show("prod", "nope");
    assert_exit_code(&output, EXIT_USAGE);
    assert_stderr_contains(&output, "secret \"nope\" for \"prod\" environment not found");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_show_with_key_override() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);
    let private = t.read("prod.private");
    fs::remove_file(t.path("prod.private")).unwrap();

    let output = t.show("prod", "db-password");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "private key");

    let output = t.show_with_key("prod", &private, "db-password");
    assert_success(&output);
    assert_eq!(stdout(&output), "s3cr3t\n");
}

#[test]
fn test_show_with_key_from_env_var() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);
    let private = t.read("prod.private");
    fs::remove_file(t.path("prod.private")).unwrap();

    let output = t
        .cmd()
        .env("UNTOLD_PRIVATE_KEY", &private)
        .args(["show-secret", "--env", "prod", "db-password"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "s3cr3t\n");
}

#[test]
fn test_show_with_wrong_key_fails() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);

    let output = t.show_with_key("prod", STRANGER_PRIVATE_KEY, "db-password");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "can not decrypt secret \"db-password\"");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_show_with_malformed_key_fails() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);

    let output = t.show_with_key("prod", "c2hvcnQ=", "db-password");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "expected 32 bytes");
}

#[test]
fn test_show_tampered_secret_fails() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);
    fs::write(t.secret_path("prod", "db-password"), FORGED_BOX).unwrap();

    let output = t.show("prod", "db-password");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "can not decrypt");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_show_corrupt_base64_fails() {
    let t = Test::with_secrets("prod", &[("db-password", "s3cr3t")]);
    fs::write(t.secret_path("prod", "db-password"), "@@not base64@@").unwrap();

    let output = t.show("prod", "db-password");
    assert_exit_code(&output, EXIT_FAILURE);
    assert_stderr_contains(&output, "invalid base64");
}
