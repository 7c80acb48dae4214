use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Produces a salted bcrypt hash suitable for storage.
///
/// bcrypt salts every call, so hashing the same password twice yields
/// different strings.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A malformed or unsupported hash counts as a mismatch rather than an error,
/// so callers see a uniform `false` and learn nothing about the stored format.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}
