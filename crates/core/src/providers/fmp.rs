use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::dividend::DividendRecord;
use crate::models::quote::Quote;
use crate::models::settings::MarketDataConfig;
use super::traits::{FxRateProvider, MarketDataProvider};

const PROVIDER_NAME: &str = "Financial Modeling Prep";

/// Financial Modeling Prep provider for quotes, dividend history, and
/// historical forex closes.
///
/// - **Endpoints**: `/quote/{symbol}`,
///   `/historical-price-full/stock_dividend/{symbol}`,
///   `/historical-price-full/forex/{PAIR}?from={date}&to={date}`
/// - **Auth**: `apikey` query parameter, supplied via `MarketDataConfig`.
///   The key never appears in error messages (see `From<reqwest::Error>`).
pub struct FmpProvider {
    client: Client,
    config: MarketDataConfig,
}

impl FmpProvider {
    pub fn new(config: MarketDataConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }
}

// ── FMP API response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct DividendHistoryResponse {
    #[serde(default)]
    historical: Vec<DividendRow>,
}

/// One row of the stock_dividend feed. All dates arrive as strings and
/// are frequently empty for older payouts.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DividendRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    adj_dividend: Decimal,
    #[serde(default)]
    dividend: Decimal,
    #[serde(default)]
    record_date: String,
    #[serde(default)]
    payment_date: String,
    #[serde(default)]
    declaration_date: String,
}

#[derive(Deserialize)]
struct ForexHistoryResponse {
    #[serde(default)]
    historical: Vec<ForexRow>,
}

#[derive(Deserialize)]
struct ForexRow {
    date: String,
    close: Option<Decimal>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl DividendRow {
    /// Convert a wire row into a typed record. Rows without a parseable
    /// ex-dividend date are unusable for eligibility matching and are
    /// skipped by the caller.
    fn into_record(self) -> Option<DividendRecord> {
        let ex_date = parse_date(&self.date)?;
        Some(DividendRecord {
            ex_date,
            label: self.label,
            adj_dividend: self.adj_dividend,
            gross_per_unit: self.dividend,
            record_date: parse_date(&self.record_date),
            payment_date: parse_date(&self.payment_date),
            declaration_date: parse_date(&self.declaration_date),
            currency: "USD".to_string(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let symbol = symbol.to_uppercase();
        let url = format!(
            "{}/quote/{symbol}?apikey={}",
            self.config.base_url, self.config.api_key
        );
        debug!("fetching quote for {symbol}");

        // The quote endpoint wraps the single result in an array
        let quotes: Vec<Quote> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse quote response for {symbol}: {e}"),
            })?;

        quotes
            .into_iter()
            .next()
            .ok_or(CoreError::QuoteNotAvailable(symbol))
    }

    async fn dividend_history(&self, symbol: &str) -> Result<Vec<DividendRecord>, CoreError> {
        let symbol = symbol.to_uppercase();
        let url = format!(
            "{}/historical-price-full/stock_dividend/{symbol}?apikey={}",
            self.config.base_url, self.config.api_key
        );
        debug!("fetching dividend history for {symbol}");

        let resp: DividendHistoryResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse dividend history for {symbol}: {e}"),
            })?;

        let mut records = Vec::with_capacity(resp.historical.len());
        for row in resp.historical {
            let raw_date = row.date.clone();
            match row.into_record() {
                Some(record) => records.push(record),
                None => warn!("skipping {symbol} dividend with invalid ex-date: '{raw_date}'"),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl FxRateProvider for FmpProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn historical_close(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CoreError> {
        let pair = format!("{}{}", from.to_uppercase(), to.to_uppercase());
        let date_str = date.format("%Y-%m-%d");
        let url = format!(
            "{}/historical-price-full/forex/{pair}?from={date_str}&to={date_str}&apikey={}",
            self.config.base_url, self.config.api_key
        );
        debug!("fetching {pair} close for {date}");

        let resp: ForexHistoryResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse {pair} history for {date}: {e}"),
            })?;

        Ok(resp
            .historical
            .iter()
            .find(|row| parse_date(&row.date) == Some(date))
            .and_then(|row| row.close))
    }
}
