//! simple_bank - accounts and atomic money transfers over HTTP
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌─────────────┐    ┌──────────┐
//! │  Config  │───▶│   Gateway   │───▶│ Coordinator │───▶│  Ledger  │
//! │  (YAML)  │    │ (axum, JWT) │    │ (transfers) │    │ (sqlx)   │
//! └──────────┘    └─────────────┘    └─────────────┘    └──────────┘
//! ```
//!
//! Flags: `--env/-e <name>` selects `config/<name>.yaml`, `--port <n>`
//! overrides the gateway port, `--memory` runs on the in-memory store.

use std::sync::Arc;

use anyhow::Context;
use simple_bank::auth::JwtMaker;
use simple_bank::config::AppConfig;
use simple_bank::db::Database;
use simple_bank::gateway::{run_server, state::AppState};
use simple_bank::ledger::{LedgerStore, MemoryLedgerStore, PgLedgerStore};
use simple_bank::logging::init_logging;
use simple_bank::transfer::TransferCoordinator;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn use_memory_store() -> bool {
    std::env::args().any(|a| a == "--memory")
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn LedgerStore>> {
    if use_memory_store() {
        tracing::warn!("Using in-memory ledger store; data is lost on exit");
        return Ok(Arc::new(MemoryLedgerStore::new()));
    }

    let db = Database::connect(&config.postgres_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db.init_schema()
        .await
        .context("Failed to initialize ledger schema")?;

    Ok(Arc::new(PgLedgerStore::with_isolation(
        db.pool().clone(),
        config.transfer.isolation,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _guard = init_logging(&config);
    tracing::info!(
        env = %env,
        version = env!("BUILD_VERSION"),
        "Starting simple_bank"
    );

    let store = open_store(&config).await?;
    let coordinator = Arc::new(TransferCoordinator::with_policy(
        store.clone(),
        config.transfer.policy,
    ));
    let token_maker =
        Arc::new(JwtMaker::new(&config.token.symmetric_key).context("Invalid token.symmetric_key")?);

    tracing::info!(
        store = store.name(),
        max_retries = config.transfer.policy.max_retries,
        retry_max_delay_ms = config.transfer.policy.retry_max_delay_ms,
        allow_overdraft = config.transfer.policy.allow_overdraft,
        isolation = ?config.transfer.isolation,
        "Ledger ready"
    );

    let state = Arc::new(AppState::new(store, coordinator, token_maker));
    run_server(&config.gateway, state).await
}
