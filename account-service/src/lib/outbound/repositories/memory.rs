use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountDirectory;

/// Process-local account directory.
///
/// Identifiers start at 1 and are never reused. The uniqueness check and the
/// insert happen under one write guard, so concurrent registrations of the
/// same username leave exactly one winner.
#[derive(Default)]
pub struct InMemoryAccountDirectory {
    inner: RwLock<Accounts>,
}

#[derive(Default)]
struct Accounts {
    last_id: i64,
    by_id: HashMap<AccountId, Account>,
    by_username: HashMap<Username, AccountId>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.inner.write().await;

        if accounts.by_username.contains_key(&account.username) {
            return Err(AccountError::UsernameTaken(
                account.username.as_str().to_string(),
            ));
        }

        accounts.last_id += 1;
        let created = Account {
            id: AccountId(accounts.last_id),
            username: account.username,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };

        accounts
            .by_username
            .insert(created.username.clone(), created.id);
        accounts.by_id.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.inner.read().await;

        Ok(accounts
            .by_username
            .get(username)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }
}
