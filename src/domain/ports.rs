use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_series::PriceSeries;
use async_trait::async_trait;

/// Source of daily OHLCV history.
///
/// An unknown ticker must come back as an empty series, not an error;
/// errors are reserved for transport or provider failures.
#[async_trait]
pub trait PriceDataProvider: Send + Sync {
    async fn daily_history(&self, ticker: &str, period: Period)
    -> Result<PriceSeries, PredictionError>;

    fn name(&self) -> &str;
}
