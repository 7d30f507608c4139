//! In-memory ledger store
//!
//! Behaves like the PostgreSQL store at the seams the transfer flow relies on:
//! - `add_account_balance` inside a unit takes a per-account row lock that is
//!   held until the unit commits or is dropped
//! - writes are buffered and become visible only on commit
//! - ID sequences are not rolled back

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::error::StoreError;
use super::models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Entry, ListEntriesParams, ListTransfersParams, Transfer,
};
use super::store::{LedgerStore, LedgerTx};

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    entries: BTreeMap<i64, Entry>,
    transfers: BTreeMap<i64, Transfer>,
    next_account_id: i64,
    next_entry_id: i64,
    next_transfer_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn require_account(&self, id: i64, column: &str) -> Result<(), StoreError> {
        if self.accounts.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "{column} references missing account {id}"
            )))
        }
    }
}

#[derive(Default)]
struct Shared {
    tables: Mutex<Tables>,
    row_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl Shared {
    async fn row_lock(&self, account_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.row_locks.lock().await;
        locks.entry(account_id).or_default().clone()
    }
}

/// Ledger store kept in process memory
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    shared: Arc<Shared>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed row counts `(accounts, entries, transfers)`
    pub async fn row_counts(&self) -> (usize, usize, usize) {
        let tables = self.shared.tables.lock().await;
        (
            tables.accounts.len(),
            tables.entries.len(),
            tables.transfers.len(),
        )
    }

    fn begin_unit(&self) -> MemoryLedgerTx {
        MemoryLedgerTx {
            shared: self.shared.clone(),
            held: HashMap::new(),
            deltas: BTreeMap::new(),
            entries: Vec::new(),
            transfers: Vec::new(),
        }
    }
}

fn page<T: Clone>(
    rows: impl Iterator<Item = T>,
    limit: i64,
    offset: i64,
) -> Result<Vec<T>, StoreError> {
    let limit = usize::try_from(limit)
        .map_err(|_| StoreError::Constraint("LIMIT must not be negative".to_string()))?;
    let offset = usize::try_from(offset)
        .map_err(|_| StoreError::Constraint("OFFSET must not be negative".to_string()))?;
    Ok(rows.skip(offset).take(limit).collect())
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        let mut tables = self.shared.tables.lock().await;
        let id = Tables::next_id(&mut tables.next_account_id);
        let account = Account {
            id,
            owner: params.owner,
            balance: params.balance,
            currency: params.currency,
            created_at: Utc::now(),
        };
        tables.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let tables = self.shared.tables.lock().await;
        tables.accounts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn add_account_balance(
        &self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        let mut tx = self.begin_unit();
        let account = tx.add_account_balance(params).await?;
        Box::new(tx).commit().await?;
        Ok(account)
    }

    async fn create_entry(&self, params: CreateEntryParams) -> Result<Entry, StoreError> {
        let mut tx = self.begin_unit();
        let entry = tx.create_entry(params).await?;
        Box::new(tx).commit().await?;
        Ok(entry)
    }

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError> {
        let tables = self.shared.tables.lock().await;
        tables.entries.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_entries(&self, params: ListEntriesParams) -> Result<Vec<Entry>, StoreError> {
        let tables = self.shared.tables.lock().await;
        let rows = tables
            .entries
            .values()
            .filter(|e| e.account_id == params.account_id)
            .cloned();
        page(rows, params.limit, params.offset)
    }

    async fn create_transfer(&self, params: CreateTransferParams) -> Result<Transfer, StoreError> {
        let mut tx = self.begin_unit();
        let transfer = tx.create_transfer(params).await?;
        Box::new(tx).commit().await?;
        Ok(transfer)
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        let tables = self.shared.tables.lock().await;
        tables.transfers.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_transfers(
        &self,
        params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        let tables = self.shared.tables.lock().await;
        let rows = tables
            .transfers
            .values()
            .filter(|t| {
                t.from_account_id == params.from_account_id
                    || t.to_account_id == params.to_account_id
            })
            .cloned();
        page(rows, params.limit, params.offset)
    }

    async fn begin(&self) -> Result<Box<dyn LedgerTx>, StoreError> {
        Ok(Box::new(self.begin_unit()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Open in-memory unit. Dropping it discards buffered writes and releases
/// every row lock it holds.
pub struct MemoryLedgerTx {
    shared: Arc<Shared>,
    held: HashMap<i64, OwnedMutexGuard<()>>,
    /// Pending balance deltas by account id
    deltas: BTreeMap<i64, i64>,
    entries: Vec<Entry>,
    transfers: Vec<Transfer>,
}

#[async_trait]
impl LedgerTx for MemoryLedgerTx {
    async fn create_transfer(
        &mut self,
        params: CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        if params.amount <= 0 {
            return Err(StoreError::Constraint(
                "transfers.amount must be positive".to_string(),
            ));
        }

        let mut tables = self.shared.tables.lock().await;
        tables.require_account(params.from_account_id, "transfers.from_account_id")?;
        tables.require_account(params.to_account_id, "transfers.to_account_id")?;

        let transfer = Transfer {
            id: Tables::next_id(&mut tables.next_transfer_id),
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
            created_at: Utc::now(),
        };
        self.transfers.push(transfer.clone());
        Ok(transfer)
    }

    async fn create_entry(&mut self, params: CreateEntryParams) -> Result<Entry, StoreError> {
        let mut tables = self.shared.tables.lock().await;
        tables.require_account(params.account_id, "entries.account_id")?;

        let entry = Entry {
            id: Tables::next_id(&mut tables.next_entry_id),
            account_id: params.account_id,
            amount: params.amount,
            created_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    async fn add_account_balance(
        &mut self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        // Unknown rows are never locked, like an UPDATE matching nothing
        if !self
            .shared
            .tables
            .lock()
            .await
            .accounts
            .contains_key(&params.id)
        {
            return Err(StoreError::NotFound);
        }

        if !self.held.contains_key(&params.id) {
            let lock = self.shared.row_lock(params.id).await;
            let guard = lock.lock_owned().await;
            self.held.insert(params.id, guard);
        }

        // Committed balance cannot move while the row lock is held
        let mut account = self
            .shared
            .tables
            .lock()
            .await
            .accounts
            .get(&params.id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        let pending = self.deltas.get(&params.id).copied().unwrap_or(0);
        let delta = pending
            .checked_add(params.amount)
            .ok_or_else(|| StoreError::Constraint("balance out of range".to_string()))?;
        account.balance = account
            .balance
            .checked_add(delta)
            .ok_or_else(|| StoreError::Constraint("balance out of range".to_string()))?;

        self.deltas.insert(params.id, delta);
        Ok(account)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryLedgerTx {
            shared,
            held,
            deltas,
            entries,
            transfers,
        } = *self;

        {
            let mut tables = shared.tables.lock().await;
            for (id, delta) in deltas {
                if let Some(account) = tables.accounts.get_mut(&id) {
                    account.balance += delta;
                }
            }
            for entry in entries {
                tables.entries.insert(entry.id, entry);
            }
            for transfer in transfers {
                tables.transfers.insert(transfer.id, transfer);
            }
        }

        drop(held);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
