use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::CoreError;
use crate::models::dividend::AllocatedDividend;
use crate::models::money::round2;
use super::fx_service::FxService;

/// Flat foreign withholding rate assumed for all paying jurisdictions.
const WITHHOLDING_RATE: Decimal = dec!(0.15);

/// Polish flat capital-income tax rate.
const POLISH_TAX_RATE: Decimal = dec!(0.19);

/// The tax pipeline's output: per-dividend figures plus aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxedDividends {
    pub dividends: Vec<AllocatedDividend>,

    /// Σ total_gross, rounded after summation
    pub total_dividend_value: Decimal,

    /// Σ withholding_tax_usd × allocated_quantity, rounded after summation
    pub total_withholding_tax_paid: Decimal,

    /// Σ tax_due_pln_per_unit × allocated_quantity, rounded after summation
    pub tax_due_in_poland: Decimal,
}

impl TaxedDividends {
    pub fn empty() -> Self {
        Self {
            dividends: Vec::new(),
            total_dividend_value: Decimal::ZERO,
            total_withholding_tax_paid: Decimal::ZERO,
            tax_due_in_poland: Decimal::ZERO,
        }
    }
}

/// Computes withholding tax and Polish tax due for allocated dividends.
///
/// Per dividend, with the USD/PLN close of the day before payment:
/// - `withholding_tax_usd = gross_usd × 0.15`
/// - `dividend_pln = gross_usd × rate`
/// - `tax_due_pln_per_unit = dividend_pln × 0.19 − withholding_tax_usd × rate`
///
/// Every figure is rounded to 2 decimals half-up immediately after it is
/// computed, and the aggregates sum those already-rounded values. The
/// withholding credit is converted at the same USD/PLN rate as the
/// dividend itself — correct for USD payouts, which is what the gross
/// amounts are normalized to before they reach this service.
pub struct TaxService;

impl TaxService {
    pub fn new() -> Self {
        Self
    }

    pub async fn compute(
        &self,
        allocated: Vec<AllocatedDividend>,
        fx: &FxService,
    ) -> Result<TaxedDividends, CoreError> {
        let mut dividends = Vec::with_capacity(allocated.len());

        for div in allocated {
            let payment_date = div.record.payment_date.ok_or_else(|| {
                CoreError::ValidationError(
                    "allocated dividend is missing its payment date".to_string(),
                )
            })?;
            let lookup = payment_date.pred_opt().unwrap_or(payment_date);
            let rate = fx.resolve_or_fallback("USD", "PLN", lookup).await?;

            let withholding_tax_usd = round2(div.gross_per_unit_usd * WITHHOLDING_RATE);
            let dividend_pln = round2(div.gross_per_unit_usd * rate);
            let tax_due_pln_per_unit =
                round2(dividend_pln * POLISH_TAX_RATE - withholding_tax_usd * rate);

            dividends.push(AllocatedDividend {
                fx_rate_usd_pln: rate,
                withholding_tax_usd,
                dividend_pln,
                tax_due_pln_per_unit,
                ..div
            });
        }

        let total_dividend_value = round2(dividends.iter().map(|d| d.total_gross).sum());
        let total_withholding_tax_paid = round2(
            dividends
                .iter()
                .map(|d| d.withholding_tax_usd * d.allocated_quantity)
                .sum(),
        );
        let tax_due_in_poland = round2(
            dividends
                .iter()
                .map(|d| d.tax_due_pln_per_unit * d.allocated_quantity)
                .sum(),
        );

        Ok(TaxedDividends {
            dividends,
            total_dividend_value,
            total_withholding_tax_paid,
            tax_due_in_poland,
        })
    }
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new()
    }
}
