//! bcrypt helpers for admin account passwords.

use bcrypt::BcryptError;

/// Hash a password with the given bcrypt work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against a stored bcrypt hash. A malformed hash
/// counts as a failed verification rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
