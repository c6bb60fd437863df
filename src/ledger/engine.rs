//! Transfer Execution Engine
//!
//! Executes one point-to-point transfer as a single PostgreSQL transaction:
//! lock both account rows, verify funds, append the transfer record and its
//! two ledger entries, then apply both balance updates. Everything commits
//! together or not at all; any error path drops the transaction, which
//! rolls it back.
//!
//! Concurrent transfers on the same pair of accounts in opposite directions
//! would deadlock if each locked "from" before "to". The engine instead
//! locks by account id, lowest first, so every transaction touching a given
//! pair requests the two row locks in the same global order.

use sqlx::PgPool;
use std::time::Duration;

use super::accounts::AccountStore;
use super::entries::EntryStore;
use super::error::LedgerError;
use super::models::TransferResult;
use super::transfers::TransferStore;

/// Bounded exponential backoff for retryable failures (lock conflicts,
/// store timeouts). Retrying lives here, outside the single-attempt
/// atomic operation, so callers control idempotency.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the given 1-based failed attempt:
    /// base * 2^(attempt-1), capped at max_delay.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exp);
        delay.min(self.max_delay)
    }
}

/// Total lock order over a pair of accounts: lowest id first.
fn lock_order(a: i64, b: i64) -> (i64, i64) {
    if a < b { (a, b) } else { (b, a) }
}

pub struct TransferEngine;

impl TransferEngine {
    /// Execute a single transfer atomically.
    ///
    /// On success returns the created transfer, both entries (debit leg
    /// negative, credit leg positive), and both accounts with their
    /// post-transfer balances. On any failure nothing is persisted.
    pub async fn execute(
        pool: &PgPool,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<TransferResult, LedgerError> {
        if from_account_id == to_account_id {
            return Err(LedgerError::SameAccount);
        }
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let (first, second) = lock_order(from_account_id, to_account_id);

        let mut tx = pool.begin().await?;

        // Lock both rows in global order. Dropping `tx` on any early
        // return below rolls the transaction back.
        let first_account = AccountStore::get_for_update(&mut *tx, first).await?;
        let second_account = AccountStore::get_for_update(&mut *tx, second).await?;

        // Funds check is by identity, not lock order, and happens under
        // the lock so a concurrent transfer cannot invalidate it.
        let from_balance = if first == from_account_id {
            first_account.balance
        } else {
            second_account.balance
        };
        if from_balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id: from_account_id,
                balance: from_balance,
                requested: amount,
            });
        }

        let transfer =
            TransferStore::create(&mut *tx, from_account_id, to_account_id, amount).await?;
        let from_entry = EntryStore::create(&mut *tx, Some(from_account_id), -amount).await?;
        let to_entry = EntryStore::create(&mut *tx, Some(to_account_id), amount).await?;

        // Balance writes in the same order the locks were taken.
        let first_delta = if first == from_account_id {
            -amount
        } else {
            amount
        };
        let first_updated = AccountStore::add_balance(&mut *tx, first, first_delta).await?;
        let second_updated = AccountStore::add_balance(&mut *tx, second, -first_delta).await?;

        tx.commit().await?;

        let (from_account, to_account) = if first == from_account_id {
            (first_updated, second_updated)
        } else {
            (second_updated, first_updated)
        };

        tracing::debug!(
            transfer_id = transfer.id,
            from_account_id,
            to_account_id,
            amount,
            "transfer committed"
        );

        Ok(TransferResult {
            transfer,
            from_account,
            to_account,
            from_entry,
            to_entry,
        })
    }

    /// Execute with bounded retry on transient store contention.
    ///
    /// Business errors (insufficient funds, not found, same account) are
    /// returned immediately; only conflicts and timeouts are retried.
    pub async fn execute_with_retry(
        pool: &PgPool,
        policy: &RetryPolicy,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<TransferResult, LedgerError> {
        let mut attempt = 1;
        loop {
            match Self::execute(pool, from_account_id, to_account_id, amount).await {
                Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retryable transfer failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_is_total() {
        assert_eq!(lock_order(1, 2), (1, 2));
        assert_eq!(lock_order(2, 1), (1, 2));
        assert_eq!(lock_order(i64::MAX, 1), (1, i64::MAX));
        // Both directions of the same pair lock identically
        for (a, b) in [(3, 9), (9, 3), (100, 7), (7, 100)] {
            let (x, y) = lock_order(a, b);
            assert!(x < y);
            assert_eq!(lock_order(a, b), lock_order(b, a));
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(50));
        assert_eq!(policy.delay_for(2), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(200));
        // Deep attempts hit the cap instead of overflowing
        assert_eq!(policy.delay_for(10), Duration::from_secs(1));
        assert_eq!(policy.delay_for(40), Duration::from_secs(1));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert!(policy.base_delay < policy.max_delay);
    }
}
