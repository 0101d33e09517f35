use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::stock::StockAggregate;
use super::traits::StockStore;

/// File-backed store: one JSON document mapping symbol → aggregate.
///
/// Each operation reads and rewrites the whole document, mirroring the
/// engine's recompute-and-overwrite lifecycle. A missing file reads as
/// an empty store; the file is created on first `put`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, StockAggregate>, CoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = std::fs::read(&self.path)?;
        let stocks = serde_json::from_slice(&bytes)?;
        Ok(stocks)
    }

    fn write_all(&self, stocks: &BTreeMap<String, StockAggregate>) -> Result<(), CoreError> {
        let json = serde_json::to_vec_pretty(stocks)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl StockStore for JsonFileStore {
    async fn get(&self, symbol: &str) -> Result<Option<StockAggregate>, CoreError> {
        let stocks = self.read_all()?;
        Ok(stocks.get(&symbol.to_uppercase()).cloned())
    }

    async fn put(&self, aggregate: &StockAggregate) -> Result<(), CoreError> {
        let mut stocks = self.read_all()?;
        stocks.insert(aggregate.symbol.to_uppercase(), aggregate.clone());
        self.write_all(&stocks)
    }

    async fn delete(&self, symbol: &str) -> Result<bool, CoreError> {
        let mut stocks = self.read_all()?;
        let removed = stocks.remove(&symbol.to_uppercase()).is_some();
        if removed {
            self.write_all(&stocks)?;
        }
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<StockAggregate>, CoreError> {
        // BTreeMap keeps symbols sorted
        let stocks = self.read_all()?;
        Ok(stocks.into_values().collect())
    }
}
