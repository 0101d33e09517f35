pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use errors::CoreError;
use models::settings::Settings;
use models::stock::StockAggregate;
use models::transaction::Transaction;
use providers::fmp::FmpProvider;
use providers::traits::{FxRateProvider, MarketDataProvider};
use services::stock_service::StockService;
use storage::traits::StockStore;

/// Main entry point for the Dividend Tax Tracker core library.
///
/// Wires the storage and market-data collaborators into the ingest
/// pipeline. Each ingest is one synchronous unit of work: the symbol's
/// full ledger is replayed, dividends are re-allocated, taxes
/// recomputed, and the stored aggregate replaced wholesale.
#[must_use]
pub struct StockTracker {
    store: Box<dyn StockStore>,
    stock_service: StockService,
}

impl std::fmt::Debug for StockTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockTracker").finish_non_exhaustive()
    }
}

impl StockTracker {
    /// Build a tracker backed by Financial Modeling Prep for both
    /// market data and FX rates, configured from `settings`.
    pub fn new(settings: Settings, store: Box<dyn StockStore>) -> Self {
        let market = Box::new(FmpProvider::new(settings.market_data.clone()));
        let fx = Box::new(FmpProvider::new(settings.market_data.clone()));
        Self::with_providers(settings, store, market, fx)
    }

    /// Build a tracker with explicit collaborators. The injection seam
    /// for tests and for embedders with their own data sources.
    pub fn with_providers(
        settings: Settings,
        store: Box<dyn StockStore>,
        market: Box<dyn MarketDataProvider>,
        fx: Box<dyn FxRateProvider>,
    ) -> Self {
        Self {
            stock_service: StockService::new(market, fx, &settings),
            store,
        }
    }

    // ── Ingest ──────────────────────────────────────────────────────

    /// Ingest one buy/sell transaction and return the recomputed
    /// aggregate for its symbol. Nothing is persisted if any stage
    /// fails.
    pub async fn ingest_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<StockAggregate, CoreError> {
        self.stock_service
            .ingest(self.store.as_ref(), transaction)
            .await
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Get the stored aggregate for a symbol (case-insensitive).
    pub async fn get_stock(&self, symbol: &str) -> Result<Option<StockAggregate>, CoreError> {
        self.store.get(symbol).await
    }

    /// Get all stored aggregates, sorted by symbol.
    pub async fn get_stocks(&self) -> Result<Vec<StockAggregate>, CoreError> {
        self.store.list().await
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Delete the stored aggregate for a symbol. Returns whether one
    /// existed.
    pub async fn delete_stock(&self, symbol: &str) -> Result<bool, CoreError> {
        self.store.delete(symbol).await
    }
}
