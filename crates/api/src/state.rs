use std::sync::Arc;

use paperfans_core::ledger::LedgerBridge;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: paperfans_db::DbPool,
    /// Server configuration (bind address, CORS, JWT validation).
    pub config: Arc<ServerConfig>,
    /// Chain CLI bridge for the on-chain actions.
    pub ledger: Arc<LedgerBridge>,
}

impl AppState {
    pub fn new(pool: paperfans_db::DbPool, config: ServerConfig) -> Self {
        let ledger = Arc::new(LedgerBridge::new(config.ledger.clone()));
        Self {
            pool,
            config: Arc::new(config),
            ledger,
        }
    }
}
