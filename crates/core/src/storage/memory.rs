use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::stock::StockAggregate;
use super::traits::StockStore;

/// In-memory store, for tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryStockStore {
    stocks: Mutex<HashMap<String, StockAggregate>>,
}

impl MemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for MemoryStockStore {
    async fn get(&self, symbol: &str) -> Result<Option<StockAggregate>, CoreError> {
        let stocks = self
            .stocks
            .lock()
            .map_err(|e| CoreError::Storage(format!("store lock poisoned: {e}")))?;
        Ok(stocks.get(&symbol.to_uppercase()).cloned())
    }

    async fn put(&self, aggregate: &StockAggregate) -> Result<(), CoreError> {
        let mut stocks = self
            .stocks
            .lock()
            .map_err(|e| CoreError::Storage(format!("store lock poisoned: {e}")))?;
        stocks.insert(aggregate.symbol.to_uppercase(), aggregate.clone());
        Ok(())
    }

    async fn delete(&self, symbol: &str) -> Result<bool, CoreError> {
        let mut stocks = self
            .stocks
            .lock()
            .map_err(|e| CoreError::Storage(format!("store lock poisoned: {e}")))?;
        Ok(stocks.remove(&symbol.to_uppercase()).is_some())
    }

    async fn list(&self) -> Result<Vec<StockAggregate>, CoreError> {
        let stocks = self
            .stocks
            .lock()
            .map_err(|e| CoreError::Storage(format!("store lock poisoned: {e}")))?;
        let mut all: Vec<StockAggregate> = stocks.values().cloned().collect();
        all.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(all)
    }
}
