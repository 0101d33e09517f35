use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Buying shares of a stock
    Buy,
    /// Selling shares of a stock
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "buy"),
            TransactionKind::Sell => write!(f, "sell"),
        }
    }
}

/// A single buy/sell transaction in the ledger.
///
/// Transactions are append-only. Their order in the ledger is
/// authoritative: the replay engine never re-sorts them by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Ticker symbol, uppercased (e.g., "AAPL", "KO")
    pub symbol: String,

    /// Trade date (no time component — daily granularity)
    pub date: NaiveDate,

    /// Buy or sell
    pub kind: TransactionKind,

    /// Number of shares (always non-negative)
    pub quantity: Decimal,

    /// Price per share in the holding currency
    pub price: Decimal,

    /// Broker commission for this trade
    pub commission: Decimal,
}

impl Transaction {
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        kind: TransactionKind,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            date,
            kind,
            quantity,
            price,
            commission,
        }
    }

    /// Convenience constructors for the two transaction kinds
    pub fn buy(
        symbol: impl Into<String>,
        date: NaiveDate,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
    ) -> Self {
        Self::new(symbol, date, TransactionKind::Buy, quantity, price, commission)
    }

    pub fn sell(
        symbol: impl Into<String>,
        date: NaiveDate,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
    ) -> Self {
        Self::new(symbol, date, TransactionKind::Sell, quantity, price, commission)
    }
}
