//! Account ledger: accounts, entries and transfers
//!
//! [`LedgerStore`] is the seam between the transfer flow and persistence.
//! [`PgLedgerStore`] is the production store; [`MemoryLedgerStore`] is a
//! drop-in replacement for tests.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod queries;
pub mod store;
#[cfg(test)]
pub(crate) mod unavailable;

pub use error::StoreError;
pub use memory::MemoryLedgerStore;
pub use models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Currency, Entry, ListEntriesParams, ListTransfersParams, Transfer,
    UnsupportedCurrency,
};
pub use postgres::{IsolationLevel, PgLedgerStore};
pub use store::{LedgerStore, LedgerTx};
