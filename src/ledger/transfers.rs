//! Transfer store: the logical movement records.

use sqlx::PgExecutor;

use super::error::LedgerError;
use super::models::Transfer;

pub struct TransferStore;

impl TransferStore {
    /// Record a transfer between two accounts
    pub async fn create(
        executor: impl PgExecutor<'_>,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, LedgerError> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;

        Ok(transfer)
    }

    /// Get transfer by ID
    pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Transfer, LedgerError> {
        let row = sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::TransferNotFound(id))
    }

    /// List transfers in creation order, optionally filtered by either side
    pub async fn list(
        executor: impl PgExecutor<'_>,
        from_account_id: Option<i64>,
        to_account_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError> {
        let rows = sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers
               WHERE ($1::BIGINT IS NULL OR from_account_id = $1)
                 AND ($2::BIGINT IS NULL OR to_account_id = $2)
               ORDER BY id
               LIMIT $3 OFFSET $4"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Administrative correction of a transfer amount. Does not touch the
    /// paired entries or balances; never called by the engine.
    pub async fn update_amount(
        executor: impl PgExecutor<'_>,
        id: i64,
        amount: i64,
    ) -> Result<Transfer, LedgerError> {
        let row = sqlx::query_as::<_, Transfer>(
            r#"UPDATE transfers SET amount = $1
               WHERE id = $2
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::TransferNotFound(id))
    }

    /// Administrative removal of a transfer record
    pub async fn delete(executor: impl PgExecutor<'_>, id: i64) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::TransferNotFound(id));
        }
        Ok(())
    }
}
