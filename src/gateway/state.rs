use std::sync::Arc;

use crate::auth::JwtMaker;
use crate::ledger::LedgerStore;
use crate::transfer::TransferCoordinator;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Ledger store for account reads and writes outside a transfer
    pub store: Arc<dyn LedgerStore>,
    /// Transfer coordinator (shares `store`)
    pub coordinator: Arc<TransferCoordinator>,
    /// Access token verifier
    pub token_maker: Arc<JwtMaker>,
    /// Build version reported by `/health`
    pub version: &'static str,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        coordinator: Arc<TransferCoordinator>,
        token_maker: Arc<JwtMaker>,
    ) -> Self {
        Self {
            store,
            coordinator,
            token_maker,
            version: env!("BUILD_VERSION"),
        }
    }
}
