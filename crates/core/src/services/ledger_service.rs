use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::ownership::OwnershipPeriod;
use crate::models::settings::OversellPolicy;
use crate::models::transaction::{Transaction, TransactionKind};

/// The facts derived from replaying a transaction ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Σ buys − Σ sells + Σ commissions over all transactions.
    /// Commission is always added, for buys and sells alike — that is
    /// the ledger's accounting convention, not an error.
    pub money_invested: Decimal,

    pub ownership_periods: Vec<OwnershipPeriod>,
}

/// Replays the append-only transaction ledger into money-invested and
/// ownership-period facts.
///
/// Pure business logic — no I/O, no clock. Transactions are processed
/// in ledger order; the replay never re-sorts them by date.
pub struct LedgerService {
    oversell: OversellPolicy,
}

impl LedgerService {
    pub fn new(oversell: OversellPolicy) -> Self {
        Self { oversell }
    }

    /// Replay the full ledger.
    pub fn replay(&self, transactions: &[Transaction]) -> Result<Ledger, CoreError> {
        Ok(Ledger {
            money_invested: self.money_invested(transactions),
            ownership_periods: self.ownership_periods(transactions)?,
        })
    }

    /// Σ(buy quantity × price) − Σ(sell quantity × price) + Σ commission.
    pub fn money_invested(&self, transactions: &[Transaction]) -> Decimal {
        let mut total_buy = Decimal::ZERO;
        let mut total_sell = Decimal::ZERO;
        let mut commission = Decimal::ZERO;

        for t in transactions {
            commission += t.commission;
            match t.kind {
                TransactionKind::Buy => total_buy += t.quantity * t.price,
                TransactionKind::Sell => total_sell += t.quantity * t.price,
            }
        }
        total_buy - total_sell + commission
    }

    /// Build ownership periods with a single forward scan.
    ///
    /// Every buy/sell boundary closes the currently open period at the
    /// transaction date (with the pre-trade share count) and starts a
    /// fresh one at the new cumulative size. A trailing open period
    /// (`end_date = None`) denotes the current position.
    ///
    /// A sell exceeding the current position is an
    /// `InvariantViolation` under `OversellPolicy::Reject`; under
    /// `Allow` the ledger is replayed as-is and a sell with no open
    /// position is simply ignored, as the original system did.
    pub fn ownership_periods(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<OwnershipPeriod>, CoreError> {
        let mut periods = Vec::new();
        let mut total_held = Decimal::ZERO;
        let mut period_start = None;

        for t in transactions {
            match t.kind {
                TransactionKind::Buy => {
                    if total_held > Decimal::ZERO {
                        if let Some(start) = period_start {
                            periods.push(OwnershipPeriod::new(start, Some(t.date), total_held));
                        }
                    }
                    total_held += t.quantity;
                    period_start = Some(t.date);
                }
                TransactionKind::Sell => {
                    if self.oversell == OversellPolicy::Reject && t.quantity > total_held {
                        return Err(CoreError::InvariantViolation(format!(
                            "Cannot sell {} {} on {} — only {} held",
                            t.quantity, t.symbol, t.date, total_held
                        )));
                    }
                    if total_held > Decimal::ZERO {
                        if let Some(start) = period_start {
                            // Close with the pre-sale share count
                            periods.push(OwnershipPeriod::new(start, Some(t.date), total_held));
                            total_held -= t.quantity;
                            period_start = if total_held > Decimal::ZERO {
                                Some(t.date)
                            } else {
                                None
                            };
                        }
                    }
                }
            }
        }

        if total_held > Decimal::ZERO {
            if let Some(start) = period_start {
                periods.push(OwnershipPeriod::new(start, None, total_held));
            }
        }

        Ok(periods)
    }
}
