use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// What to do when the FX backward-walk exhausts its attempts without
/// finding a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FxFallbackPolicy {
    /// Surface `CoreError::RateNotAvailable` and abort the ingest
    FailFast,
    /// Use this constant rate instead (the original system used 4.00
    /// PLN per USD)
    Constant(Decimal),
}

/// What to do when a sell transaction exceeds the shares currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OversellPolicy {
    /// Surface `CoreError::InvariantViolation` (default)
    Reject,
    /// Replay the ledger as-is, allowing the position to go short
    Allow,
}

/// Connection settings for the market-data collaborator.
///
/// The API key is always supplied by the embedding application; the
/// library ships no credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataConfig {
    pub api_key: String,
    pub base_url: String,
}

impl MarketDataConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://financialmodelingprep.com/api/v3".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency all holdings and dividend figures are normalized to
    pub base_currency: String,

    pub oversell: OversellPolicy,

    pub fx_fallback: FxFallbackPolicy,

    pub market_data: MarketDataConfig,
}

impl Settings {
    /// Default settings for the given market-data API key: USD base
    /// currency, oversells rejected, missing USD/PLN rates replaced by
    /// the historical constant of 4.00.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_currency: "USD".to_string(),
            oversell: OversellPolicy::Reject,
            fx_fallback: FxFallbackPolicy::Constant(dec!(4.0)),
            market_data: MarketDataConfig::new(api_key),
        }
    }

    pub fn with_oversell(mut self, policy: OversellPolicy) -> Self {
        self.oversell = policy;
        self
    }

    pub fn with_fx_fallback(mut self, policy: FxFallbackPolicy) -> Self {
        self.fx_fallback = policy;
        self
    }
}
