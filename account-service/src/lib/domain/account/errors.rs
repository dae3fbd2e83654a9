use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid account id: {0}")]
    InvalidFormat(String),
}

/// Error for missing registration or login fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid credentials: {0}")]
    Validation(#[from] CredentialsError),

    /// Deliberately says nothing about which check failed.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password encoding failed: {0}")]
    Encoding(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<auth::AuthenticationError> for AccountError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AccountError::AuthenticationFailed,
            auth::AuthenticationError::Password(e) => AccountError::Encoding(e.to_string()),
            auth::AuthenticationError::Token(e) => AccountError::Signing(e.to_string()),
        }
    }
}
