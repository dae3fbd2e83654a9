use thiserror::Error;

/// Error type for password operations.
///
/// `Mismatch` is the expected outcome of a wrong password and is kept
/// apart from `MalformedHash`, which means the stored hash itself is corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password encoding failed: {0}")]
    Encoding(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
