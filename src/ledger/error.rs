//! Ledger store errors
//!
//! PostgreSQL failures are classified by SQLSTATE so callers can tell a
//! retryable serialization conflict from a hard failure.

use thiserror::Error;

/// SQLSTATE `serialization_failure`
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE `deadlock_detected`
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE class 23: integrity constraint violation
const INTEGRITY_CLASS: &str = "23";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Row not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Transaction conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// Whether re-running the whole atomic unit may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return StoreError::NotFound;
        }

        let classified = e.as_database_error().and_then(|db| {
            let code = db.code()?;
            if code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED {
                Some(StoreError::Conflict(db.message().to_string()))
            } else if code.starts_with(INTEGRITY_CLASS) {
                Some(StoreError::Constraint(db.message().to_string()))
            } else {
                None
            }
        });

        classified.unwrap_or(StoreError::Database(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_pool_errors_stay_database_errors() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_only_conflicts_are_retryable() {
        assert!(StoreError::Conflict("could not serialize".into()).is_retryable());
        assert!(!StoreError::NotFound.is_retryable());
        assert!(!StoreError::Constraint("fk".into()).is_retryable());
    }
}
