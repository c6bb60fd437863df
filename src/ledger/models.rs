//! Data models for the ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bank account. Balance is a signed integer in the smallest currency
/// unit (cents for USD); the engine never lets it go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One account's side of one balance change. Positive amount = credit,
/// negative = debit. Immutable once written by the engine; `account_id`
/// is nullable for administratively detached entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub account_id: Option<i64>,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// The logical movement between two accounts. Always paired with exactly
/// two entries (one per side) when created by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Everything a successful transfer produced: the transfer row, both
/// entries, and both accounts with their post-transfer balances.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}
