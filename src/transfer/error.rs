//! Transfer Error Types

use thiserror::Error;

use crate::ledger::{Currency, StoreError};

/// Transfer error types
///
/// `code()` is stable and is what API clients match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Source and target account cannot be the same")]
    SameAccount,

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Account {account_id} currency mismatch: {actual} vs {expected}")]
    CurrencyMismatch {
        account_id: i64,
        expected: Currency,
        actual: Currency,
    },

    #[error("From account doesn't belong to the authenticated user")]
    Unauthorized,

    #[error("Insufficient funds in account {account_id}: balance {balance}, amount {amount}")]
    InsufficientFunds {
        account_id: i64,
        balance: i64,
        amount: i64,
    },

    // === Lookup Errors ===
    #[error("Transfer not found: {0}")]
    TransferNotFound(i64),

    // === System Errors ===
    #[error("Transaction conflict, retry the transfer")]
    TransactionConflict,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TransferError {
    /// Stable machine-readable code, recorded on rejection log lines
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            TransferError::Unauthorized => "UNAUTHORIZED",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::TransferNotFound(_) => "TRANSFER_NOT_FOUND",
            TransferError::TransactionConflict => "TRANSACTION_CONFLICT",
            TransferError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidAmount
            | TransferError::SameAccount
            | TransferError::CurrencyMismatch { .. } => 400,
            TransferError::Unauthorized => 401,
            TransferError::AccountNotFound(_) | TransferError::TransferNotFound(_) => 404,
            TransferError::TransactionConflict => 409,
            TransferError::InsufficientFunds { .. } => 422,
            TransferError::Internal(_) => 500,
        }
    }

    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::TransactionConflict)
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        if e.is_retryable() {
            TransferError::TransactionConflict
        } else {
            TransferError::Internal(e.to_string())
        }
    }
}
