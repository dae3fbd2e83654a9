use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountIdError;
use crate::account::errors::CredentialsError;

/// Account aggregate entity.
///
/// Holds the password hash, so it never leaves the service as is; see
/// [`AccountProfile`] for the outward view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Outward view of the account with the password hash stripped.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Account fields known before storage assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: Username,
    pub password_hash: String,
}

/// Account unique identifier, assigned by the directory on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Non-empty and case-sensitive. Stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Errors
    /// * `EmptyUsername` - Username is empty
    pub fn new(username: String) -> Result<Self, CredentialsError> {
        if username.is_empty() {
            return Err(CredentialsError::EmptyUsername);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username and plaintext password as submitted by a client.
///
/// Lives only for the duration of one request. `Debug` redacts the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are present and return the validated username.
    ///
    /// # Errors
    /// * `EmptyUsername` - Username is empty
    /// * `EmptyPassword` - Password is empty
    pub fn validate(&self) -> Result<Username, CredentialsError> {
        let username = Username::new(self.username.clone())?;
        if self.password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(username)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account as exposed to clients: identifier and username only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub username: Username,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_empty() {
        assert_eq!(
            Username::new(String::new()),
            Err(CredentialsError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_is_case_sensitive() {
        let lower = Username::new("alice".to_string()).unwrap();
        let upper = Username::new("Alice".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("alice", "pw1").validate().is_ok());
        assert_eq!(
            Credentials::new("", "pw1").validate(),
            Err(CredentialsError::EmptyUsername)
        );
        assert_eq!(
            Credentials::new("alice", "").validate(),
            Err(CredentialsError::EmptyPassword)
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_account_id_parsing() {
        assert_eq!("42".parse::<AccountId>(), Ok(AccountId(42)));
        assert!("forty-two".parse::<AccountId>().is_err());
        assert_eq!(AccountId(42).to_string(), "42");
    }

    #[test]
    fn test_profile_strips_hash() {
        let account = Account {
            id: AccountId(3),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let profile = account.profile();
        assert_eq!(profile.id, AccountId(3));
        assert_eq!(profile.username.as_str(), "alice");
        assert!(!format!("{:?}", profile).contains("argon2"));
    }
}
