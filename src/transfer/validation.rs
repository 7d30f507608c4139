//! Transfer validation
//!
//! Pure checks over the request and already-fetched accounts. None of these
//! touch the store.

use crate::ledger::{Account, Currency};

use super::error::TransferError;
use super::types::TransferRequest;

/// Shape checks that need no account data
pub fn check_request(req: &TransferRequest) -> Result<(), TransferError> {
    if req.amount <= 0 {
        return Err(TransferError::InvalidAmount);
    }

    if req.from_account_id == req.to_account_id {
        return Err(TransferError::SameAccount);
    }

    Ok(())
}

pub fn check_currency(account: &Account, currency: Currency) -> Result<(), TransferError> {
    if account.currency != currency {
        return Err(TransferError::CurrencyMismatch {
            account_id: account.id,
            expected: currency,
            actual: account.currency,
        });
    }

    Ok(())
}

/// The acting owner comes from a verified token
pub fn check_owner(account: &Account, acting_owner: &str) -> Result<(), TransferError> {
    if account.owner != acting_owner {
        return Err(TransferError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(id: i64, owner: &str, currency: Currency) -> Account {
        Account {
            id,
            owner: owner.to_string(),
            balance: 100,
            currency,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_request() {
        assert!(check_request(&TransferRequest::new(1, 2, 10, Currency::Usd)).is_ok());
        assert_eq!(
            check_request(&TransferRequest::new(1, 2, 0, Currency::Usd)),
            Err(TransferError::InvalidAmount)
        );
        assert_eq!(
            check_request(&TransferRequest::new(1, 2, -5, Currency::Usd)),
            Err(TransferError::InvalidAmount)
        );
        assert_eq!(
            check_request(&TransferRequest::new(3, 3, 10, Currency::Usd)),
            Err(TransferError::SameAccount)
        );
    }

    #[test]
    fn test_check_currency() {
        let acc = account(7, "alice", Currency::Usd);
        assert!(check_currency(&acc, Currency::Usd).is_ok());
        assert_eq!(
            check_currency(&acc, Currency::Eur),
            Err(TransferError::CurrencyMismatch {
                account_id: 7,
                expected: Currency::Eur,
                actual: Currency::Usd,
            })
        );
    }

    #[test]
    fn test_check_owner() {
        let acc = account(7, "alice", Currency::Usd);
        assert!(check_owner(&acc, "alice").is_ok());
        assert_eq!(check_owner(&acc, "bob"), Err(TransferError::Unauthorized));
        assert_eq!(check_owner(&acc, "Alice"), Err(TransferError::Unauthorized));
    }
}
