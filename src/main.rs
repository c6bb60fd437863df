//! coreledger - service entry point
//!
//! Loads the environment config, initializes logging, connects to
//! PostgreSQL, and bootstraps the ledger schema. The HTTP/RPC layer that
//! drives the transfer engine lives outside this crate.

use anyhow::Result;

use coreledger::config::AppConfig;
use coreledger::db::Database;
use coreledger::ledger::schema;
use coreledger::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!(env = %env, "coreledger starting");

    let db = Database::connect(&config.database).await?;
    db.health_check().await?;
    schema::init_schema(db.pool()).await?;

    tracing::info!("ledger schema ready, transfer engine available");
    Ok(())
}
