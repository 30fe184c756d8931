//! Normalization applied before any credential lookup or comparison.

/// Trim and lowercase a login identifier (handle or email).
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Trim and case-fold a plaintext secret.
///
/// Only the student path compares secrets this way; hashed secrets are
/// passed to bcrypt untouched.
pub fn normalize_secret(secret: &str) -> String {
    secret.trim().to_lowercase()
}
