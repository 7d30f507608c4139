//! simple_bank - banking backend built around an atomic money transfer
//!
//! # Modules
//!
//! - [`ledger`] - Accounts, entries and transfers; PostgreSQL and in-memory stores
//! - [`transfer`] - Transfer coordinator and validation
//! - [`auth`] - Access tokens and the bearer middleware
//! - [`gateway`] - HTTP API (axum) and OpenAPI document
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL pool and schema
//! - [`util`] - Random fixtures

pub mod auth;
pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod transfer;
pub mod util;

// Convenient re-exports at crate root
pub use ledger::{
    Account, Currency, Entry, LedgerStore, LedgerTx, MemoryLedgerStore, PgLedgerStore,
    StoreError, Transfer,
};
pub use transfer::{TransferCoordinator, TransferError, TransferRequest, TransferTxResult};
