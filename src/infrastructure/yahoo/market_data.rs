use super::types::{ChartResponse, series_from_chart};
use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_series::PriceSeries;
use crate::domain::ports::PriceDataProvider;
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Daily history from the Yahoo chart API.
pub struct YahooPriceDataProvider {
    client: Client,
    base_url: String,
}

impl YahooPriceDataProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout, connect_timeout),
            base_url: base_url.into(),
        }
    }

    /// `<base>/v8/finance/chart/<ticker>`, with the ticker percent-encoded (`^GSPC`).
    pub fn chart_url(&self, ticker: &str) -> Result<Url, PredictionError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            PredictionError::upstream(format!("invalid Yahoo base URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PredictionError::upstream(format!("Yahoo base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);

        Ok(url)
    }
}

#[async_trait]
impl PriceDataProvider for YahooPriceDataProvider {
    async fn daily_history(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<PriceSeries, PredictionError> {
        let url = self.chart_url(ticker)?;
        debug!("Yahoo: fetching {} ({}) from {}", ticker, period, url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("range", period.as_range_str()),
                ("interval", "1d"),
                ("events", "div,split"),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await
            .map_err(|e| {
                PredictionError::upstream(format!("failed to fetch {} from Yahoo: {}", ticker, e))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Yahoo: ticker {} not found", ticker);
            return Ok(PriceSeries::empty(ticker));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Yahoo: {} for {}: {}", status, ticker, error_text);
            return Err(PredictionError::upstream(format!(
                "Yahoo returned {} for {}",
                status, ticker
            )));
        }

        let body: ChartResponse = response.json().await.map_err(|e| {
            PredictionError::upstream(format!("failed to decode Yahoo chart for {}: {}", ticker, e))
        })?;

        let series = series_from_chart(ticker, body)?;
        info!("Yahoo: {} daily bars for {} ({})", series.len(), ticker, period);
        Ok(series)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}
