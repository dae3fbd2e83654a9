use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Username;
use crate::account::errors::AccountError;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `credentials` - Username and plaintext password
    ///
    /// # Returns
    /// Profile of the created account (no password hash)
    ///
    /// # Errors
    /// * `Validation` - Username or password is empty; nothing is written
    /// * `UsernameTaken` - Username is already registered
    /// * `Encoding` - Password hashing failed
    /// * `Storage` - Directory operation failed
    async fn register(&self, credentials: Credentials) -> Result<AccountProfile, AccountError>;

    /// Exchange valid credentials for an identity token.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown username or wrong password (indistinguishable)
    /// * `Encoding` - Stored hash is unusable
    /// * `Signing` - Token could not be issued
    /// * `Storage` - Directory operation failed
    async fn login(&self, credentials: Credentials) -> Result<String, AccountError>;

    /// Resolve the account behind an authenticated identity.
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `Storage` - Directory operation failed
    async fn resolve_current_account(&self, id: AccountId)
        -> Result<AccountProfile, AccountError>;
}

/// Persistence operations for account records.
#[async_trait]
pub trait AccountDirectory: Send + Sync + 'static {
    /// Persist a new account and assign its identifier.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Storage` - Storage operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact username.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;
}
