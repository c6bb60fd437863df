//! coreledger - Double-Entry Ledger Core
//!
//! A small banking ledger on PostgreSQL: every money movement is an atomic
//! transfer that debits one account, credits another, and appends the two
//! matching ledger entries plus a transfer record in a single transaction.
//!
//! # Modules
//!
//! - [`config`] - YAML environment configuration
//! - [`logging`] - tracing subscriber setup (file + stdout)
//! - [`db`] - PostgreSQL connection pool
//! - [`ledger`] - accounts, entries, transfers, and the transfer engine

pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use ledger::{
    Account, AccountStore, Entry, EntryStore, LedgerError, RetryPolicy, Transfer, TransferEngine,
    TransferResult, TransferStore,
};
