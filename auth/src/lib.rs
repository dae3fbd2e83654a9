//! Authentication core shared by the account service.
//!
//! - Password encoding and verification (Argon2id)
//! - Stateless, time-bound identity tokens (HS256 JWT)
//! - Login coordination with uniform failure timing
//!
//! # Examples
//!
//! ## Password Encoding
//! ```
//! use auth::PasswordCodec;
//! use auth::PasswordError;
//!
//! let codec = PasswordCodec::new();
//! let hash = codec.hash("my_password").unwrap();
//! assert!(codec.verify("my_password", &hash).is_ok());
//! assert_eq!(codec.verify("other", &hash), Err(PasswordError::Mismatch));
//! ```
//!
//! ## Identity Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{SigningKey, TokenService};
//!
//! let key = SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(Arc::new(key), chrono::Duration::hours(24));
//!
//! let token = tokens.issue(42_i64, "alice").unwrap();
//! let account_id: i64 = tokens.validate(&token).unwrap();
//! assert_eq!(account_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, SigningKey, TokenService};
//!
//! let key = SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(TokenService::new(Arc::new(key), chrono::Duration::hours(1))).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, 7_i64, "alice").unwrap();
//!
//! // Protected request: validate token
//! let account_id: i64 = auth.validate_token(&token).unwrap();
//! assert_eq!(account_id, 7);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordCodec;
pub use password::PasswordError;
pub use token::SigningKey;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenService;
