use std::str::FromStr;

use crate::password::PasswordCodec;
use crate::password::PasswordError;
use crate::token::TokenError;
use crate::token::TokenService;

/// Password used to build the decoy hash. Never matches a real login because
/// callers only reach the decoy when no account exists.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    codec: PasswordCodec,
    tokens: TokenService,
    decoy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// Pre-computes the decoy hash used by [`Authenticator::reject`].
    ///
    /// # Errors
    /// * `PasswordError::Encoding` - The decoy hash could not be computed
    pub fn new(tokens: TokenService) -> Result<Self, PasswordError> {
        let codec = PasswordCodec::new();
        let decoy_hash = codec.hash(DECOY_PASSWORD)?;

        Ok(Self {
            codec,
            tokens,
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.codec.hash(password)
    }

    /// Verify a password and issue a token for the account on success.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: impl ToString,
        username: &str,
    ) -> Result<String, AuthenticationError> {
        match self.codec.verify(password, stored_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidCredentials),
            Err(e) => return Err(AuthenticationError::Password(e)),
        }

        Ok(self.tokens.issue(account_id, username)?)
    }

    /// Fail a login for which no account exists.
    ///
    /// Runs a full verification against the decoy hash so the caller spends the
    /// same time as on a wrong password for an existing account.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        let _ = self.codec.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a token and return the identifier it carries.
    pub fn validate_token<Id: FromStr>(&self, token: &str) -> Result<Id, TokenError> {
        self.tokens.validate(token)
    }
}
