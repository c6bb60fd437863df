use sqlx::PgPool;

/// Initialize the ledger schema. All statements are idempotent, so this
/// is safe to run on every startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing ledger schema...");

    sqlx::query(CREATE_ACCOUNTS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_ENTRIES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_TRANSFERS_TABLE).execute(pool).await?;

    sqlx::query(CREATE_ENTRIES_ACCOUNT_IDX).execute(pool).await?;
    sqlx::query(CREATE_TRANSFERS_FROM_IDX).execute(pool).await?;
    sqlx::query(CREATE_TRANSFERS_TO_IDX).execute(pool).await?;

    tracing::info!("Ledger schema initialized successfully");
    Ok(())
}

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id          BIGSERIAL PRIMARY KEY,
    owner       TEXT NOT NULL,
    balance     BIGINT NOT NULL,
    currency    TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// account_id is nullable: administrative correction may detach an entry
// from its account without destroying the ledger line itself.
const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id          BIGSERIAL PRIMARY KEY,
    account_id  BIGINT REFERENCES accounts (id),
    amount      BIGINT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers (
    id              BIGSERIAL PRIMARY KEY,
    from_account_id BIGINT NOT NULL REFERENCES accounts (id),
    to_account_id   BIGINT NOT NULL REFERENCES accounts (id),
    amount          BIGINT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_ENTRIES_ACCOUNT_IDX: &str =
    "CREATE INDEX IF NOT EXISTS entries_account_id_idx ON entries (account_id)";

const CREATE_TRANSFERS_FROM_IDX: &str =
    "CREATE INDEX IF NOT EXISTS transfers_from_account_id_idx ON transfers (from_account_id)";

const CREATE_TRANSFERS_TO_IDX: &str =
    "CREATE INDEX IF NOT EXISTS transfers_to_account_id_idx ON transfers (to_account_id)";
