use std::collections::BTreeSet;
use thiserror::Error;

use super::{
    account::{Account, AccountId},
    storage::{KeyValueStorage, StorageError},
};

pub const DEFAULT_STORAGE_KEY: &str = "accounts";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persisted accounts under key {key} are corrupt - {reason}")]
    PersistedStateCorrupt { key: String, reason: String },

    #[error("Could not read persisted accounts - {0}")]
    PersistenceReadFailed(#[source] StorageError),

    #[error("Could not persist accounts - {0}")]
    PersistenceWriteFailed(#[source] StorageError),

    #[error("No account ids left, {0} is the last one")]
    IdsExhausted(AccountId),
}

pub type StoreResult<T> = anyhow::Result<T, StoreError>;

/// Owns the account list and the id counter. Persistence only happens on
/// explicit `load_accounts`/`save_accounts` calls.
#[derive(Debug)]
pub struct Store<S> {
    accounts: Vec<Account>,
    next_id: AccountId,
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            accounts: Vec::new(),
            next_id: AccountId::new(1),
            storage,
            key: key.into(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// The id the next `add_account` will hand out
    pub fn next_id(&self) -> AccountId {
        self.next_id
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Fails instead of wrapping when the counter cannot move past the id it would hand out,
    /// so `next_id` always stays above every issued id.
    pub fn add_account(&mut self) -> StoreResult<&Account> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(StoreError::IdsExhausted(id))?;
        self.accounts.push(Account::new(id));
        debug!("added account {id}");

        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Unknown ids are ignored
    pub fn delete_account(&mut self, id: AccountId) {
        let before = self.accounts.len();
        self.accounts.retain(|account| account.id != id);

        if self.accounts.len() == before {
            debug!("delete of unknown account {id} ignored");
        } else {
            debug!("deleted account {id}");
        }
    }

    /// Replaces the record with the same id in place. Nothing is merged.
    pub fn update_account(&mut self, updated: Account) {
        match self.accounts.iter_mut().find(|a| a.id == updated.id) {
            Some(existing) => {
                debug!("updated account {}", updated.id);
                *existing = updated;
            }
            None => debug!("update of unknown account {} ignored", updated.id),
        }
    }

    /// Replaces the collection with the persisted one, if any.
    pub fn load_accounts(&mut self) -> StoreResult<()> {
        let saved = self
            .storage
            .get_item(&self.key)
            .map_err(StoreError::PersistenceReadFailed)?;

        let saved = match saved {
            Some(saved) if !saved.is_empty() => saved,
            _ => {
                info!("no accounts persisted under {}", self.key);
                return Ok(());
            }
        };

        let accounts = self.parse(&saved)?;
        let max_id = accounts.iter().map(|a| a.id.get()).max().unwrap_or(0);
        let next_id = AccountId::new(max_id)
            .next()
            .ok_or_else(|| self.corrupt(format!("account id {max_id} leaves no next id")))?;

        self.accounts = accounts;
        self.next_id = next_id;
        info!(
            "loaded {} accounts from {}, next id {}",
            self.accounts.len(),
            self.key,
            self.next_id
        );
        Ok(())
    }

    /// Writes the whole collection under the storage key. The counter is not stored.
    pub fn save_accounts(&mut self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.accounts)
            .map_err(|e| StoreError::PersistenceWriteFailed(e.into()))?;

        self.storage
            .set_item(&self.key, &payload)
            .map_err(StoreError::PersistenceWriteFailed)?;

        info!("saved {} accounts to {}", self.accounts.len(), self.key);
        Ok(())
    }

    fn parse(&self, saved: &str) -> StoreResult<Vec<Account>> {
        let accounts: Vec<Account> = serde_json::from_str(saved).map_err(|e| self.corrupt(e))?;

        let mut seen = BTreeSet::new();
        for account in &accounts {
            if !seen.insert(account.id) {
                return Err(self.corrupt(format!("duplicate account id {}", account.id)));
            }
        }

        Ok(accounts)
    }

    fn corrupt(&self, reason: impl ToString) -> StoreError {
        StoreError::PersistedStateCorrupt {
            key: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}
