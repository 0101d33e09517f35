use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::stock::StockAggregate;

/// Storage collaborator for per-symbol aggregates.
///
/// The contract is read-modify-write with no concurrency token: `put`
/// overwrites whatever is stored for the symbol. Callers that need
/// stronger guarantees must layer them on top (e.g., a conditional
/// write in the backing store).
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Fetch the stored aggregate for `symbol`, if any.
    async fn get(&self, symbol: &str) -> Result<Option<StockAggregate>, CoreError>;

    /// Store the aggregate under its symbol, replacing any previous one.
    async fn put(&self, aggregate: &StockAggregate) -> Result<(), CoreError>;

    /// Remove the aggregate for `symbol`. Returns whether one existed.
    async fn delete(&self, symbol: &str) -> Result<bool, CoreError>;

    /// All stored aggregates, sorted by symbol for deterministic output.
    async fn list(&self) -> Result<Vec<StockAggregate>, CoreError>;
}
