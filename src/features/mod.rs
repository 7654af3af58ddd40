mod account;
mod form;
mod storage;
mod store;

pub use self::{
    account::{Account, AccountError, AccountId, AccountType, Label},
    form::{format_labels, parse_labels, validate, FormInput},
    storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, StorageResult},
    store::{Store, StoreError, StoreResult, DEFAULT_STORAGE_KEY},
};
