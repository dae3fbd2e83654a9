use std::str::FromStr;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::key::SigningKey;

/// Issues and validates stateless identity tokens.
///
/// Tokens are HS256 JWTs signed with the shared [`SigningKey`] and expire a
/// fixed duration after issuance. No token state is kept server side.
#[derive(Debug, Clone)]
pub struct TokenService {
    key: Arc<SigningKey>,
    expiration: Duration,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `key` - Signing key loaded at startup
    /// * `expiration` - Lifetime of every issued token
    pub fn new(key: Arc<SigningKey>, expiration: Duration) -> Self {
        Self {
            key,
            expiration,
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for an account, valid from now.
    ///
    /// # Errors
    /// * `Signing` - Claims could not be serialized or signed
    pub fn issue(&self, account_id: impl ToString, username: &str) -> Result<String, TokenError> {
        self.issue_at(account_id, username, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        account_id: impl ToString,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::for_account(account_id, username, issued_at, self.expiration)
            .ok_or_else(|| TokenError::Signing("token expiry is out of range".to_string()))?;

        encode(&Header::new(self.algorithm), &claims, &self.key.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    /// * `Expired` - `now >= exp`
    /// * `Invalid` - Malformed token, bad signature, or missing claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<TokenClaims>(token, &self.key.decoding, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        // jsonwebtoken still accepts a token whose exp equals the current second
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }

    /// Validate a token and recover the account identifier it was issued for.
    ///
    /// Does not check whether the account still exists.
    ///
    /// # Errors
    /// * `Expired` - Token lifetime has elapsed
    /// * `Invalid` - Token failed verification or its subject does not parse as `Id`
    pub fn validate<Id: FromStr>(&self, token: &str) -> Result<Id, TokenError> {
        let claims = self.decode(token)?;

        claims
            .sub
            .parse()
            .map_err(|_| TokenError::Invalid(format!("unexpected subject: {}", claims.sub)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &[u8], expiration: Duration) -> TokenService {
        let key = SigningKey::from_secret(secret).expect("Failed to build key");
        TokenService::new(Arc::new(key), expiration)
    }

    #[test]
    fn test_issue_and_validate() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::hours(1));

        let token = tokens.issue(42_i64, "alice").expect("Failed to issue token");
        assert!(!token.is_empty());

        let account_id: i64 = tokens.validate(&token).expect("Failed to validate token");
        assert_eq!(account_id, 42);

        let claims = tokens.decode(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_validate_invalid_token() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::hours(1));

        let result = tokens.validate::<i64>("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let issuer = service(b"secret1_at_least_32_bytes_long_key!", Duration::hours(1));
        let verifier = service(b"secret2_at_least_32_bytes_long_key!", Duration::hours(1));

        let token = issuer.issue(7_i64, "bob").unwrap();
        assert!(matches!(
            verifier.validate::<i64>(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::minutes(5));

        let token = tokens
            .issue_at(1_i64, "alice", Utc::now() - Duration::minutes(10))
            .unwrap();
        assert_eq!(tokens.validate::<i64>(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_out_of_range_expiration_is_a_signing_error() {
        let tokens = service(
            b"my_secret_key_at_least_32_bytes_long!",
            Duration::hours(1_000_000_000_000),
        );

        let result = tokens.issue(1_i64, "alice");
        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    #[test]
    fn test_token_expiring_this_second_is_rejected() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::minutes(5));

        let token = tokens
            .issue_at(1_i64, "alice", Utc::now() - Duration::minutes(5))
            .unwrap();
        assert_eq!(tokens.validate::<i64>(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_any_tampered_character_is_rejected() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::hours(1));
        let token = tokens.issue(42_i64, "alice").unwrap();

        for (position, original) in token.char_indices() {
            if original == '.' {
                continue;
            }
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement.to_string());

            assert!(
                tokens.validate::<i64>(&tampered).is_err(),
                "tampering at position {} was accepted",
                position
            );
        }
    }

    #[test]
    fn test_non_numeric_subject_is_invalid_for_numeric_id() {
        let tokens = service(b"my_secret_key_at_least_32_bytes_long!", Duration::hours(1));
        let token = tokens.issue("not-a-number", "alice").unwrap();

        assert!(matches!(
            tokens.validate::<i64>(&token),
            Err(TokenError::Invalid(_))
        ));
        assert_eq!(
            tokens.validate::<String>(&token).unwrap(),
            "not-a-number".to_string()
        );
    }

    #[test]
    fn test_token_without_expiration_is_rejected() {
        #[derive(serde::Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let secret = b"my_secret_key_at_least_32_bytes_long!";
        let tokens = service(secret, Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                sub: "42".to_string(),
            },
            &jsonwebtoken::EncodingKey::from_secret(secret),
        )
        .unwrap();

        assert!(matches!(
            tokens.validate::<i64>(&token),
            Err(TokenError::Invalid(_))
        ));
    }
}
