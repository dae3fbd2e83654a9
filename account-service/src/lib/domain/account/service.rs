use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::ports::AccountDirectory;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Username;

/// Domain service implementation for account operations.
///
/// Orchestrates registration and login over the directory and the
/// authenticator. Holds no mutable state of its own.
pub struct AccountService<AD>
where
    AD: AccountDirectory,
{
    directory: Arc<AD>,
    authenticator: Arc<Authenticator>,
}

impl<AD> AccountService<AD>
where
    AD: AccountDirectory,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Account persistence implementation
    /// * `authenticator` - Password and token handling
    pub fn new(directory: Arc<AD>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }
}

#[async_trait]
impl<AD> AccountServicePort for AccountService<AD>
where
    AD: AccountDirectory,
{
    async fn register(&self, credentials: Credentials) -> Result<AccountProfile, AccountError> {
        let username = credentials.validate()?;

        let password_hash = self
            .authenticator
            .hash_password(&credentials.password)
            .map_err(|e| AccountError::Encoding(e.to_string()))?;

        let account = self
            .directory
            .create(NewAccount {
                username,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(account.profile())
    }

    async fn login(&self, credentials: Credentials) -> Result<String, AccountError> {
        let account = match Username::new(credentials.username.clone()) {
            Ok(username) => self.directory.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            return Err(self.authenticator.reject(&credentials.password).into());
        };

        let token = self
            .authenticator
            .authenticate(
                &credentials.password,
                &account.password_hash,
                account.id,
                account.username.as_str(),
            )
            .inspect_err(|e| {
                if !matches!(e, auth::AuthenticationError::InvalidCredentials) {
                    tracing::error!(account_id = %account.id, error = %e, "Login failed internally");
                }
            })?;

        tracing::info!(account_id = %account.id, "Token issued");

        Ok(token)
    }

    async fn resolve_current_account(
        &self,
        id: AccountId,
    ) -> Result<AccountProfile, AccountError> {
        self.directory
            .find_by_id(id)
            .await?
            .map(|account| account.profile())
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}
