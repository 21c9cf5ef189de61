use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_series::PriceSeries;
use crate::domain::ports::PriceDataProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::info;

/// In-memory provider for tests and offline runs.
///
/// Unknown tickers return an empty series, like an upstream "not found".
#[derive(Clone, Default)]
pub struct MockPriceDataProvider {
    series: Arc<RwLock<HashMap<String, PriceSeries>>>,
    failure: Arc<RwLock<Option<String>>>,
    fetches: Arc<AtomicUsize>,
}

impl MockPriceDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: PriceSeries) -> Self {
        let mut map = HashMap::new();
        map.insert(series.ticker().to_string(), series);
        Self {
            series: Arc::new(RwLock::new(map)),
            ..Self::default()
        }
    }

    pub async fn insert(&self, series: PriceSeries) {
        info!(
            "MockPriceDataProvider: loaded {} bars for {}",
            series.len(),
            series.ticker()
        );
        self.series
            .write()
            .await
            .insert(series.ticker().to_string(), series);
    }

    /// Every following fetch fails with an upstream error.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write().await = Some(reason.into());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PriceDataProvider for MockPriceDataProvider {
    async fn daily_history(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<PriceSeries, PredictionError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        if let Some(reason) = self.failure.read().await.as_ref() {
            return Err(PredictionError::upstream(reason.clone()));
        }

        let series = self.series.read().await;
        Ok(series
            .get(ticker)
            .map(|stored| stored.window(period))
            .unwrap_or_else(|| PriceSeries::empty(ticker)))
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
