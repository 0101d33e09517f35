use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current market quote for a stock, as returned by the market-data
/// provider. Only the fields the engine actually consumes are modeled;
/// the upstream payload carries many more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    /// Last traded price in the stock's native currency
    pub price: Decimal,

    #[serde(default)]
    pub change: Decimal,

    #[serde(default)]
    pub changes_percentage: Decimal,
}
