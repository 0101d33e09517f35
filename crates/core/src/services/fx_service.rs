use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::settings::FxFallbackPolicy;
use crate::providers::traits::FxRateProvider;

/// Maximum number of one-day backward steps when the requested date has
/// no published quote (weekend, market holiday, missing data).
const MAX_BACKWARD_STEPS: u32 = 5;

/// Resolves historical exchange rates with a bounded backward-walk.
///
/// Asks the FX collaborator for the exact date first, then walks back
/// one day at a time for up to [`MAX_BACKWARD_STEPS`] additional days
/// and returns the first close found. Each step is one provider round
/// trip, so a full walk is at most six sequential calls.
pub struct FxService {
    provider: Box<dyn FxRateProvider>,
    fallback: FxFallbackPolicy,
}

impl FxService {
    pub fn new(provider: Box<dyn FxRateProvider>, fallback: FxFallbackPolicy) -> Self {
        Self { provider, fallback }
    }

    /// Rate of the `from`/`to` pair on or shortly before `date`, as
    /// units of `to` per 1 `from`. `Ok(None)` when the walk exhausts
    /// its attempts; provider and network errors propagate.
    pub async fn resolve(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, CoreError> {
        let mut current = date;
        for step in 0..=MAX_BACKWARD_STEPS {
            if let Some(rate) = self.provider.historical_close(from, to, current).await? {
                if step > 0 {
                    debug!("{from}/{to} rate for {date} found {step} day(s) back on {current}");
                }
                return Ok(Some(rate));
            }
            match current.pred_opt() {
                Some(prev) => current = prev,
                None => break,
            }
        }
        Ok(None)
    }

    /// Like [`resolve`](Self::resolve), but applies the configured
    /// fallback policy when the walk exhausts: `FailFast` surfaces
    /// `RateNotAvailable`, `Constant` substitutes the configured rate.
    pub async fn resolve_or_fallback(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Decimal, CoreError> {
        match self.resolve(from, to, date).await? {
            Some(rate) => Ok(rate),
            None => match self.fallback {
                FxFallbackPolicy::Constant(rate) => {
                    warn!(
                        "no {from}/{to} rate found on or before {date} — using fallback rate {rate}"
                    );
                    Ok(rate)
                }
                FxFallbackPolicy::FailFast => Err(CoreError::RateNotAvailable {
                    from: from.to_string(),
                    to: to.to_string(),
                    date: date.to_string(),
                }),
            },
        }
    }
}
