//! Transfer Coordinator
//!
//! Runs one money transfer as a single atomic unit on the ledger store:
//!
//! ```text
//! create transfer → entry(from, -amount) → entry(to, +amount)
//!                 → add balance (lower id) → add balance (higher id) → commit
//! ```
//!
//! # Lock ordering
//!
//! Balance updates lock account rows. They are always applied in ascending
//! account-ID order regardless of transfer direction, so an `A → B` and a
//! `B → A` transfer never wait on each other's rows in opposite orders.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::ledger::{
    Account, AddAccountBalanceParams, CreateEntryParams, CreateTransferParams, LedgerStore,
    LedgerTx, StoreError, Transfer,
};

use super::error::TransferError;
use super::types::{TransferPolicy, TransferRequest, TransferTxParams, TransferTxResult};
use super::validation::{check_currency, check_owner, check_request};

/// Transfer Coordinator - stateless between calls
pub struct TransferCoordinator {
    store: Arc<dyn LedgerStore>,
    policy: TransferPolicy,
}

impl TransferCoordinator {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_policy(store, TransferPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn LedgerStore>, policy: TransferPolicy) -> Self {
        Self { store, policy }
    }

    /// Validate, authorize and execute a transfer for `acting_owner`
    ///
    /// Lookups run in a fixed order: from account, its currency, its owner,
    /// then the to account and its currency. Nothing is written before every
    /// check has passed.
    pub async fn transfer(
        &self,
        acting_owner: &str,
        req: &TransferRequest,
    ) -> Result<TransferTxResult, TransferError> {
        let result = self.authorize_and_execute(acting_owner, req).await;

        if let Err(e) = &result {
            match e {
                TransferError::Internal(msg) => error!(
                    from = req.from_account_id,
                    to = req.to_account_id,
                    amount = req.amount,
                    error = %msg,
                    "Transfer failed"
                ),
                _ => debug!(
                    from = req.from_account_id,
                    to = req.to_account_id,
                    amount = req.amount,
                    code = e.code(),
                    "Transfer rejected"
                ),
            }
        }
        result
    }

    async fn authorize_and_execute(
        &self,
        acting_owner: &str,
        req: &TransferRequest,
    ) -> Result<TransferTxResult, TransferError> {
        check_request(req)?;

        let from = self.fetch_account(req.from_account_id).await?;
        check_currency(&from, req.currency)?;
        check_owner(&from, acting_owner)?;

        let to = self.fetch_account(req.to_account_id).await?;
        check_currency(&to, req.currency)?;

        self.execute(req.tx_params()).await
    }

    /// Execute the atomic unit, retrying on transaction conflicts with a
    /// jittered exponential backoff. `params` must already be validated.
    pub(crate) async fn execute(
        &self,
        params: TransferTxParams,
    ) -> Result<TransferTxResult, TransferError> {
        let mut attempt: u32 = 0;
        loop {
            match self.run_once(params).await {
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    let delay = retry_delay(&self.policy, attempt, &mut rand::thread_rng());
                    attempt += 1;
                    warn!(
                        from = params.from_account_id,
                        to = params.to_account_id,
                        amount = params.amount,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Transfer conflicted, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    /// Fetch a transfer visible to `acting_owner` (owner of either side)
    pub async fn get_transfer(
        &self,
        acting_owner: &str,
        transfer_id: i64,
    ) -> Result<Transfer, TransferError> {
        let result = self.fetch_visible_transfer(acting_owner, transfer_id).await;

        if let Err(TransferError::Internal(msg)) = &result {
            error!(transfer_id = transfer_id, error = %msg, "Transfer lookup failed");
        }
        result
    }

    async fn fetch_visible_transfer(
        &self,
        acting_owner: &str,
        transfer_id: i64,
    ) -> Result<Transfer, TransferError> {
        let transfer = match self.store.get_transfer(transfer_id).await {
            Ok(t) => t,
            Err(StoreError::NotFound) => return Err(TransferError::TransferNotFound(transfer_id)),
            Err(e) => return Err(e.into()),
        };

        let from = self.fetch_account(transfer.from_account_id).await?;
        if check_owner(&from, acting_owner).is_ok() {
            return Ok(transfer);
        }

        let to = self.fetch_account(transfer.to_account_id).await?;
        check_owner(&to, acting_owner)?;
        Ok(transfer)
    }

    async fn fetch_account(&self, id: i64) -> Result<Account, TransferError> {
        match self.store.get_account(id).await {
            Ok(account) => Ok(account),
            Err(StoreError::NotFound) => Err(TransferError::AccountNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// One attempt. Any early return drops `tx`, which rolls it back.
    async fn run_once(&self, params: TransferTxParams) -> Result<TransferTxResult, TransferError> {
        let mut tx = self.store.begin().await?;

        let transfer = tx
            .create_transfer(CreateTransferParams {
                from_account_id: params.from_account_id,
                to_account_id: params.to_account_id,
                amount: params.amount,
            })
            .await?;

        let from_entry = tx
            .create_entry(CreateEntryParams {
                account_id: params.from_account_id,
                amount: -params.amount,
            })
            .await?;

        let to_entry = tx
            .create_entry(CreateEntryParams {
                account_id: params.to_account_id,
                amount: params.amount,
            })
            .await?;

        let (from_account, to_account) = if params.from_account_id < params.to_account_id {
            add_money(
                tx.as_mut(),
                params.from_account_id,
                -params.amount,
                params.to_account_id,
                params.amount,
            )
            .await?
        } else {
            let (to_account, from_account) = add_money(
                tx.as_mut(),
                params.to_account_id,
                params.amount,
                params.from_account_id,
                -params.amount,
            )
            .await?;
            (from_account, to_account)
        };

        // Balance was read under the row lock, so this sees every committed debit
        if !self.policy.allow_overdraft && from_account.balance < 0 {
            tx.rollback().await?;
            return Err(TransferError::InsufficientFunds {
                account_id: from_account.id,
                balance: from_account.balance + params.amount,
                amount: params.amount,
            });
        }

        tx.commit().await?;

        info!(
            transfer_id = transfer.id,
            from = params.from_account_id,
            to = params.to_account_id,
            amount = params.amount,
            "Transfer committed"
        );

        Ok(TransferTxResult {
            transfer,
            from_account,
            to_account,
            from_entry,
            to_entry,
        })
    }
}

/// Full jitter: uniform in `[0, min(max, base * 2^attempt)]`
fn retry_delay(policy: &TransferPolicy, attempt: u32, rng: &mut impl Rng) -> Duration {
    let ceiling = policy
        .retry_base_delay_ms
        .saturating_mul(1u64 << attempt.min(20))
        .min(policy.retry_max_delay_ms);
    Duration::from_millis(rng.gen_range(0..=ceiling))
}

/// Apply two balance deltas in the given order. Callers pass the lower
/// account id first.
async fn add_money(
    tx: &mut dyn LedgerTx,
    account_id1: i64,
    amount1: i64,
    account_id2: i64,
    amount2: i64,
) -> Result<(Account, Account), StoreError> {
    let account1 = tx
        .add_account_balance(AddAccountBalanceParams {
            id: account_id1,
            amount: amount1,
        })
        .await?;

    let account2 = tx
        .add_account_balance(AddAccountBalanceParams {
            id: account_id2,
            amount: amount2,
        })
        .await?;

    Ok((account1, account2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_retry_delay_grows_and_is_capped() {
        let policy = TransferPolicy {
            retry_base_delay_ms: 10,
            retry_max_delay_ms: 250,
            ..TransferPolicy::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        for attempt in 0..policy.max_retries {
            let ceiling = (10u64 << attempt).min(250);
            for _ in 0..50 {
                let delay = retry_delay(&policy, attempt, &mut rng);
                assert!(delay <= Duration::from_millis(ceiling), "attempt {attempt}: {delay:?}");
            }
        }

        // Huge attempt counts must not overflow
        assert!(retry_delay(&policy, u32::MAX, &mut rng) <= Duration::from_millis(250));
    }

    #[test]
    fn test_retry_delay_is_jittered() {
        let policy = TransferPolicy::default();
        let mut rng = StdRng::seed_from_u64(7);

        let delays: std::collections::HashSet<_> = (0..20)
            .map(|_| retry_delay(&policy, 5, &mut rng))
            .collect();
        assert!(delays.len() > 1);
    }

    #[test]
    fn test_zero_base_delay_never_sleeps() {
        let policy = TransferPolicy {
            retry_base_delay_ms: 0,
            ..TransferPolicy::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(retry_delay(&policy, 3, &mut rng), Duration::ZERO);
    }
}
