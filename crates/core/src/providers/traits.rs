use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::dividend::DividendRecord;
use crate::models::quote::Quote;

/// Market-data collaborator: current quotes and dividend history.
///
/// The ingest pipeline only talks to this trait. Swapping the upstream
/// API means swapping one implementation; the engine is untouched.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current quote for a stock symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, CoreError>;

    /// Get the full dividend payout history for a stock symbol,
    /// newest first as the upstream API returns it.
    async fn dividend_history(&self, symbol: &str) -> Result<Vec<DividendRecord>, CoreError>;
}

/// Historical FX collaborator, queried one date at a time.
///
/// The backward-walk retry over market holidays lives in `FxService`,
/// not here: each call is a single round trip for a single date.
#[async_trait]
pub trait FxRateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Close price of the `from`/`to` pair on exactly `date`, as units
    /// of `to` per 1 `from`. `Ok(None)` when the market published no
    /// quote for that day (weekend, holiday, missing data).
    async fn historical_close(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CoreError>;
}
