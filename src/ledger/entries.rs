//! Entry store: the individual ledger lines.
//!
//! Entries written by the engine are immutable facts; `update_amount` and
//! `delete` exist for administrative correction only and do not restore
//! the sum-zero invariant of the transfer they belong to.

use sqlx::PgExecutor;

use super::error::LedgerError;
use super::models::Entry;

pub struct EntryStore;

impl EntryStore {
    /// Append a ledger line. Positive amount = credit, negative = debit.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        account_id: Option<i64>,
        amount: i64,
    ) -> Result<Entry, LedgerError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"INSERT INTO entries (account_id, amount)
               VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    /// Get entry by ID
    pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Entry, LedgerError> {
        let row = sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::EntryNotFound(id))
    }

    /// List entries in creation order, optionally filtered by account
    pub async fn list(
        executor: impl PgExecutor<'_>,
        account_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError> {
        let rows = sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at
               FROM entries
               WHERE ($1::BIGINT IS NULL OR account_id = $1)
               ORDER BY id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Administrative correction of an entry amount. Breaks the sum-zero
    /// invariant of the owning transfer; never called by the engine.
    pub async fn update_amount(
        executor: impl PgExecutor<'_>,
        id: i64,
        amount: i64,
    ) -> Result<Entry, LedgerError> {
        let row = sqlx::query_as::<_, Entry>(
            r#"UPDATE entries SET amount = $1
               WHERE id = $2
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::EntryNotFound(id))
    }

    /// Administrative removal of a ledger line
    pub async fn delete(executor: impl PgExecutor<'_>, id: i64) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::EntryNotFound(id));
        }
        Ok(())
    }
}
