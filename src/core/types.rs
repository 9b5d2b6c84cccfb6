//! Type aliases for domain concepts.

/// Storage address of a secret: lowercase hex SHA-256 of its name.
pub type Address = String;

/// Base64 text as it appears in key and secret files.
pub type EncodedText = String;
