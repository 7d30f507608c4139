//! Test store whose backend is down: every call fails with a pool timeout.

use async_trait::async_trait;

use super::error::StoreError;
use super::models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Entry, ListEntriesParams, ListTransfersParams, Transfer,
};
use super::store::{LedgerStore, LedgerTx};

pub struct UnavailableStore;

fn down() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl LedgerStore for UnavailableStore {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn create_account(&self, _params: CreateAccountParams) -> Result<Account, StoreError> {
        Err(down())
    }

    async fn get_account(&self, _id: i64) -> Result<Account, StoreError> {
        Err(down())
    }

    async fn add_account_balance(
        &self,
        _params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        Err(down())
    }

    async fn create_entry(&self, _params: CreateEntryParams) -> Result<Entry, StoreError> {
        Err(down())
    }

    async fn get_entry(&self, _id: i64) -> Result<Entry, StoreError> {
        Err(down())
    }

    async fn list_entries(&self, _params: ListEntriesParams) -> Result<Vec<Entry>, StoreError> {
        Err(down())
    }

    async fn create_transfer(
        &self,
        _params: CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        Err(down())
    }

    async fn get_transfer(&self, _id: i64) -> Result<Transfer, StoreError> {
        Err(down())
    }

    async fn list_transfers(
        &self,
        _params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        Err(down())
    }

    async fn begin(&self) -> Result<Box<dyn LedgerTx>, StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}
