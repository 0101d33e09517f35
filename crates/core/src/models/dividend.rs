use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw dividend payout row from the market-data provider.
///
/// The upstream feed routinely sends empty strings for the record,
/// payment, and declaration dates of older payouts, so those fields are
/// optional. The ex-dividend date is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRecord {
    /// Ex-dividend date — the canonical eligibility date
    pub ex_date: NaiveDate,

    #[serde(default)]
    pub label: String,

    /// Split-adjusted dividend per share
    #[serde(default)]
    pub adj_dividend: Decimal,

    /// Declared gross dividend per share, in `currency`
    pub gross_per_unit: Decimal,

    pub record_date: Option<NaiveDate>,

    /// Date the dividend was actually paid out
    pub payment_date: Option<NaiveDate>,

    pub declaration_date: Option<NaiveDate>,

    /// Currency the gross amount is declared in
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A dividend payout matched to the ownership history, carrying the
/// allocated share count and all derived tax figures.
///
/// Built functionally: the allocator fills the allocation fields and
/// leaves the tax fields at zero; the tax service rebuilds each record
/// with the tax fields filled. Nothing is mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatedDividend {
    /// The raw payout this allocation was derived from
    pub record: DividendRecord,

    /// Shares held in the ownership period covering the payment date
    pub allocated_quantity: Decimal,

    /// Gross per share normalized to USD (identity for USD payouts)
    pub gross_per_unit_usd: Decimal,

    /// `allocated_quantity × gross_per_unit_usd`, rounded
    pub total_gross: Decimal,

    /// USD/PLN close used for the Polish tax conversion
    pub fx_rate_usd_pln: Decimal,

    /// Foreign withholding tax per share, in USD
    pub withholding_tax_usd: Decimal,

    /// Gross per share converted to PLN
    pub dividend_pln: Decimal,

    /// Residual Polish tax per share, net of the withholding credit
    pub tax_due_pln_per_unit: Decimal,
}

impl AllocatedDividend {
    /// Freshly allocated payout with no tax figures computed yet.
    pub fn allocated(
        record: DividendRecord,
        allocated_quantity: Decimal,
        gross_per_unit_usd: Decimal,
        total_gross: Decimal,
    ) -> Self {
        Self {
            record,
            allocated_quantity,
            gross_per_unit_usd,
            total_gross,
            fx_rate_usd_pln: Decimal::ZERO,
            withholding_tax_usd: Decimal::ZERO,
            dividend_pln: Decimal::ZERO,
            tax_due_pln_per_unit: Decimal::ZERO,
        }
    }
}
