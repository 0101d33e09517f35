use log::warn;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::dividend::{AllocatedDividend, DividendRecord};
use crate::models::money::round2;
use crate::models::ownership::OwnershipPeriod;
use super::fx_service::FxService;

/// Matches raw dividend payouts against the ownership history and
/// assigns each one the share count held when it was paid.
///
/// Date conventions (canonical, applied consistently):
/// - **Eligibility** is decided by the **ex-dividend date**: a payout is
///   kept only if its ex-date falls inside some ownership period.
/// - **Quantity** comes from the period containing the **payment date**;
///   a payout whose payment date matches no period (or is missing
///   entirely) is dropped from the result, not emitted with quantity 0.
/// - **FX lookups** use the day before the payment date.
pub struct DividendService {
    /// Currency holdings are denominated in; payouts declared in any
    /// other currency are normalized to it before tax math.
    base_currency: String,
}

impl DividendService {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into().to_uppercase(),
        }
    }

    /// Allocate dividends to ownership periods. Returns a new list;
    /// the input records are never modified.
    pub async fn allocate(
        &self,
        dividends: &[DividendRecord],
        periods: &[OwnershipPeriod],
        fx: &FxService,
    ) -> Result<Vec<AllocatedDividend>, CoreError> {
        let mut allocated = Vec::new();

        for record in dividends {
            if !periods.iter().any(|p| p.contains(record.ex_date)) {
                continue;
            }

            let Some(payment_date) = record.payment_date else {
                warn!(
                    "dropping dividend with ex-date {} — no payment date",
                    record.ex_date
                );
                continue;
            };

            let Some(period) = periods.iter().find(|p| p.contains(payment_date)) else {
                warn!(
                    "dropping dividend paid {payment_date} — no ownership period covers the payment date"
                );
                continue;
            };

            let gross_usd = if record.currency == self.base_currency {
                round2(record.gross_per_unit)
            } else {
                let lookup = payment_date.pred_opt().unwrap_or(payment_date);
                let rate = match fx.resolve(&record.currency, &self.base_currency, lookup).await? {
                    Some(rate) => rate,
                    None => {
                        warn!(
                            "no {}/{} rate on or before {lookup} — keeping gross amount unconverted",
                            record.currency, self.base_currency
                        );
                        Decimal::ONE
                    }
                };
                round2(record.gross_per_unit * rate)
            };

            let total_gross = round2(period.quantity * gross_usd);
            allocated.push(AllocatedDividend::allocated(
                record.clone(),
                period.quantity,
                gross_usd,
                total_gross,
            ));
        }

        Ok(allocated)
    }
}
