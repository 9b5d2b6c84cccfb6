//! Test fixtures and constants.

use sha2::{Digest, Sha256};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for operational failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for usage errors.
pub const EXIT_USAGE: i32 = 2;

/// Standard test secrets used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("db-password", "s3cr3t"),
    ("api-key", "sk-test-12345"),
    ("jwt-secret", "super-secret-jwt-token"),
    ("redis-url", "redis://localhost:6379"),
];

/// A well-formed private key that belongs to no vault.
pub const STRANGER_PRIVATE_KEY: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

/// File name a secret is stored under.
pub fn address_of(name: &str) -> String {
    format!("{:x}", Sha256::digest(name.as_bytes()))
}

/// Base64 of 64 bytes that are not a sealed box for any key.
pub const FORGED_BOX: &str =
    "AwoRGB8mLTQ7QklQV15lbHN6gYiPlp2kq7K5wMfO1dzj6vH4/wYNFBsiKTA3PkVMU1phaG92fYSLkpmgp661vA==";
