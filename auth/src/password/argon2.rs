use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password encoding and verification.
///
/// Encodes passwords as Argon2id PHC strings with a fresh random salt per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCodec;

impl PasswordCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `Encoding` - Salt generation or the hash computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Encoding(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// The digest comparison is constant time.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `MalformedHash` - Stored hash cannot be parsed or uses unsupported parameters
    pub fn verify(&self, password: &str, encoded: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(encoded)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|e| match e {
                HashError::Password => PasswordError::Mismatch,
                other => PasswordError::MalformedHash(other.to_string()),
            })
    }
}
