//! Ledger domain module
//!
//! PostgreSQL-based double-entry ledger: account/entry/transfer stores plus
//! the transfer execution engine that composes them atomically.

pub mod accounts;
pub mod engine;
pub mod entries;
pub mod error;
pub mod models;
pub mod schema;
pub mod transfers;

// Re-export commonly used types
pub use accounts::AccountStore;
pub use engine::{RetryPolicy, TransferEngine};
pub use entries::EntryStore;
pub use error::LedgerError;
pub use models::{Account, Entry, Transfer, TransferResult};
pub use transfers::TransferStore;
