use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Transfer not found: {0}")]
    TransferNotFound(i64),

    #[error("Source and destination accounts are the same")]
    SameAccount,

    #[error("Invalid amount: must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Insufficient funds on account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_id: i64,
        balance: i64,
        requested: i64,
    },

    /// Serialization failure, deadlock, or lock timeout reported by the
    /// store. Safe to retry with backoff.
    #[error("Transaction conflict: {0}")]
    Conflict(String),

    /// Timed out acquiring a connection or waiting on the store.
    #[error("Timed out waiting on the ledger store")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl LedgerError {
    /// Transient store contention the caller may retry with bounded backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict(_) | LedgerError::Timeout)
    }
}

// SQLSTATE classes that signal transient contention rather than a broken
// statement: serialization_failure, deadlock_detected, lock_not_available.
const RETRYABLE_SQLSTATES: [&str; 3] = ["40001", "40P01", "55P03"];

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => LedgerError::Timeout,
            sqlx::Error::Database(db) => match db.code() {
                Some(code) if RETRYABLE_SQLSTATES.contains(&code.as_ref()) => {
                    LedgerError::Conflict(db.message().to_string())
                }
                _ => LedgerError::Database(err),
            },
            _ => LedgerError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err = LedgerError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, LedgerError::Timeout));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err = LedgerError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, LedgerError::Database(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_business_errors_not_retryable() {
        assert!(!LedgerError::SameAccount.is_retryable());
        assert!(!LedgerError::AccountNotFound(1).is_retryable());
        assert!(!LedgerError::InsufficientFunds {
            account_id: 1,
            balance: 100,
            requested: 150,
        }
        .is_retryable());
    }

    #[test]
    fn test_conflict_is_retryable() {
        assert!(LedgerError::Conflict("deadlock detected".to_string()).is_retryable());
    }
}
