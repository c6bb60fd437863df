//! Account store: single-row CRUD plus the locking primitives the
//! transfer engine composes inside its transaction.

use sqlx::PgExecutor;

use super::error::LedgerError;
use super::models::Account;

pub struct AccountStore;

impl AccountStore {
    /// Create a new account with an opening balance
    pub async fn create(
        executor: impl PgExecutor<'_>,
        owner: &str,
        currency: &str,
        balance: i64,
    ) -> Result<Account, LedgerError> {
        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (owner, balance, currency)
               VALUES ($1, $2, $3)
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency)
        .fetch_one(executor)
        .await?;

        tracing::debug!(account_id = account.id, owner, "account created");
        Ok(account)
    }

    /// Get account by ID (non-locking read)
    pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Account, LedgerError> {
        let row = sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::AccountNotFound(id))
    }

    /// Locking read: holds the row lock until the surrounding transaction
    /// commits or rolls back. Only meaningful on a transaction executor.
    pub async fn get_for_update(
        executor: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<Account, LedgerError> {
        let row = sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE id = $1
               FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::AccountNotFound(id))
    }

    /// List accounts in creation order, bounded by limit/offset
    pub async fn list(
        executor: impl PgExecutor<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError> {
        let rows = sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts
               ORDER BY id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Apply a relative balance change and return the updated row.
    /// Single statement, so a held row lock never interleaves with
    /// another writer between read and write.
    pub async fn add_balance(
        executor: impl PgExecutor<'_>,
        id: i64,
        delta: i64,
    ) -> Result<Account, LedgerError> {
        let row = sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = balance + $1
               WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::AccountNotFound(id))
    }

    /// Administrative absolute balance overwrite. Not used by the engine.
    pub async fn set_balance(
        executor: impl PgExecutor<'_>,
        id: i64,
        balance: i64,
    ) -> Result<Account, LedgerError> {
        let row = sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = $1
               WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(balance)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::AccountNotFound(id))
    }

    /// Rename the account owner
    pub async fn update_owner(
        executor: impl PgExecutor<'_>,
        id: i64,
        owner: &str,
    ) -> Result<Account, LedgerError> {
        let row = sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET owner = $1
               WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.ok_or(LedgerError::AccountNotFound(id))
    }

    /// Delete an account. Fails while entries or transfers still
    /// reference it (FK constraint).
    pub async fn delete(executor: impl PgExecutor<'_>, id: i64) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(id));
        }
        Ok(())
    }
}
