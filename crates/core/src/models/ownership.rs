use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous date range during which a fixed number of shares is held.
///
/// Derived by replaying the transaction ledger: every buy/sell boundary
/// closes the open period and starts a fresh one at the new cumulative
/// size. An open period (`end_date = None`) denotes current holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipPeriod {
    pub start_date: NaiveDate,

    /// `None` means the position is still open
    pub end_date: Option<NaiveDate>,

    /// Shares held during this period (always positive)
    pub quantity: Decimal,
}

impl OwnershipPeriod {
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>, quantity: Decimal) -> Self {
        Self {
            start_date,
            end_date,
            quantity,
        }
    }

    /// Whether `date` falls within `[start_date, end_date]` inclusive.
    /// An open period is unbounded on the right.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}
