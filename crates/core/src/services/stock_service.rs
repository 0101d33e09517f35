use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::settings::Settings;
use crate::models::stock::StockAggregate;
use crate::models::transaction::Transaction;
use crate::providers::traits::{FxRateProvider, MarketDataProvider};
use crate::storage::traits::StockStore;
use super::dividend_service::DividendService;
use super::fx_service::FxService;
use super::ledger_service::LedgerService;
use super::tax_service::TaxService;

/// Orchestrates a full per-symbol ingest:
/// load → replay → enrich → allocate → tax → persist.
///
/// Every stage is terminal-on-error — a failure anywhere aborts the
/// ingest and nothing is persisted. The stored aggregate is replaced
/// wholesale, never patched; concurrent ingests for the same symbol are
/// last-writer-wins (the storage collaborator carries no concurrency
/// token).
pub struct StockService {
    market: Box<dyn MarketDataProvider>,
    fx: FxService,
    ledger: LedgerService,
    dividends: DividendService,
    taxes: TaxService,
}

impl StockService {
    pub fn new(
        market: Box<dyn MarketDataProvider>,
        fx_provider: Box<dyn FxRateProvider>,
        settings: &Settings,
    ) -> Self {
        Self {
            market,
            fx: FxService::new(fx_provider, settings.fx_fallback),
            ledger: LedgerService::new(settings.oversell),
            dividends: DividendService::new(settings.base_currency.clone()),
            taxes: TaxService::new(),
        }
    }

    /// Ingest one transaction and return the freshly recomputed
    /// aggregate for its symbol.
    pub async fn ingest(
        &self,
        store: &dyn StockStore,
        transaction: Transaction,
    ) -> Result<StockAggregate, CoreError> {
        Self::validate(&transaction)?;
        let symbol = transaction.symbol.clone();

        // Load: prior aggregate, if any
        let prior = store.get(&symbol).await?;
        let mut transactions = prior.map(|s| s.transactions).unwrap_or_default();
        transactions.push(transaction);

        // Replay the full ledger
        let ledger = self.ledger.replay(&transactions)?;

        // Enrich: a missing quote is fatal — never a silent zero price
        let quote = self.market.quote(&symbol).await?;
        let history = self.market.dividend_history(&symbol).await?;

        // Allocate + tax
        let allocated = self
            .dividends
            .allocate(&history, &ledger.ownership_periods, &self.fx)
            .await?;
        let taxed = self.taxes.compute(allocated, &self.fx).await?;

        let aggregate = StockAggregate {
            symbol,
            transactions,
            ownership_periods: ledger.ownership_periods,
            money_invested: ledger.money_invested,
            current_price: quote.price,
            dividends: taxed.dividends,
            total_dividend_value: taxed.total_dividend_value,
            total_withholding_tax_paid: taxed.total_withholding_tax_paid,
            tax_due_in_poland: taxed.tax_due_in_poland,
        };

        // Persist: full replace
        store.put(&aggregate).await?;
        Ok(aggregate)
    }

    fn validate(t: &Transaction) -> Result<(), CoreError> {
        if t.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction symbol must not be empty".to_string(),
            ));
        }
        if t.quantity < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Transaction quantity must not be negative (got {})",
                t.quantity
            )));
        }
        if t.price < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Transaction price must not be negative (got {})",
                t.price
            )));
        }
        if t.commission < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Transaction commission must not be negative (got {})",
                t.commission
            )));
        }
        Ok(())
    }
}
