//! Ledger store seams
//!
//! [`LedgerStore`] exposes single-statement operations. [`LedgerTx`] is one
//! open atomic unit; callers compose its operations and then commit. An
//! uncommitted `LedgerTx` that is dropped is rolled back.

use async_trait::async_trait;

use super::error::StoreError;
use super::models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Entry, ListEntriesParams, ListTransfersParams, Transfer,
};

/// Persistent ledger state: accounts, entries and transfers
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Store name for logging
    fn name(&self) -> &'static str;

    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError>;

    /// Returns [`StoreError::NotFound`] for an unknown id
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;

    /// Atomic increment (`balance = balance + amount`), never an overwrite
    async fn add_account_balance(
        &self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError>;

    async fn create_entry(&self, params: CreateEntryParams) -> Result<Entry, StoreError>;

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError>;

    async fn list_entries(&self, params: ListEntriesParams) -> Result<Vec<Entry>, StoreError>;

    async fn create_transfer(&self, params: CreateTransferParams) -> Result<Transfer, StoreError>;

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError>;

    async fn list_transfers(
        &self,
        params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError>;

    /// Open a new atomic unit
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, StoreError>;

    /// Cheap liveness probe
    async fn ping(&self) -> Result<(), StoreError>;
}

/// One open atomic unit of ledger writes
///
/// Writes are invisible to other units until [`LedgerTx::commit`].
#[async_trait]
pub trait LedgerTx: Send {
    async fn create_transfer(
        &mut self,
        params: CreateTransferParams,
    ) -> Result<Transfer, StoreError>;

    async fn create_entry(&mut self, params: CreateEntryParams) -> Result<Entry, StoreError>;

    /// Locks the account row until the unit ends and returns the updated row
    async fn add_account_balance(
        &mut self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
