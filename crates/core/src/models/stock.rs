use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dividend::AllocatedDividend;
use super::ownership::OwnershipPeriod;
use super::transaction::Transaction;

/// The per-symbol portfolio aggregate.
///
/// Recomputed wholesale on every ingest: the full transaction ledger is
/// replayed, dividends re-allocated, and taxes re-derived, then the
/// previous stored aggregate is replaced. There is no partial mutation
/// across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAggregate {
    pub symbol: String,

    /// The append-only ledger, in ingest order
    pub transactions: Vec<Transaction>,

    pub ownership_periods: Vec<OwnershipPeriod>,

    /// Σ buys − Σ sells + Σ commissions (commissions always added)
    pub money_invested: Decimal,

    /// Last fetched market price
    pub current_price: Decimal,

    pub dividends: Vec<AllocatedDividend>,

    /// Σ total_gross over allocated dividends
    pub total_dividend_value: Decimal,

    /// Σ withholding_tax_usd × allocated_quantity
    pub total_withholding_tax_paid: Decimal,

    /// Σ tax_due_pln_per_unit × allocated_quantity
    pub tax_due_in_poland: Decimal,
}
