//! Transfer Types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ledger::{Account, Currency, Entry, Transfer};

/// Transfer request as seen by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Minor currency units
    pub amount: i64,
    pub currency: Currency,
}

impl TransferRequest {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64, currency: Currency) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
            currency,
        }
    }

    pub fn tx_params(&self) -> TransferTxParams {
        TransferTxParams {
            from_account_id: self.from_account_id,
            to_account_id: self.to_account_id,
            amount: self.amount,
        }
    }
}

/// Input of the atomic transfer unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Everything one transfer wrote, as committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

/// Coordinator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferPolicy {
    /// Extra attempts after a transaction conflict
    pub max_retries: u32,
    /// First backoff ceiling; doubles on every retry
    pub retry_base_delay_ms: u64,
    /// Upper bound for any single backoff
    pub retry_max_delay_ms: u64,
    /// Permit the from account to go below zero
    pub allow_overdraft: bool,
}

impl Default for TransferPolicy {
    fn default() -> Self {
        Self {
            max_retries: 12,
            retry_base_delay_ms: 10,
            retry_max_delay_ms: 250,
            allow_overdraft: false,
        }
    }
}
