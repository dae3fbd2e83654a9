use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for an account, expiring `ttl` after `issued_at`.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn for_account(
        account_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            sub: account_id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_account() {
        let now = Utc::now();
        let claims = TokenClaims::for_account(42, "alice", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_for_account_with_unrepresentable_expiry() {
        let ttl = Duration::hours(1_000_000_000_000);
        let claims = TokenClaims::for_account(42, "alice", Utc::now(), ttl);
        assert!(claims.is_none());
    }

    #[test]
    fn test_is_expired() {
        let claims = TokenClaims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }
}
