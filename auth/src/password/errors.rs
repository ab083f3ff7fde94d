use thiserror::Error;

/// Error type for password operations.
///
/// Verification never distinguishes a wrong password from a corrupt stored
/// hash: both surface as `Mismatch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,
}
