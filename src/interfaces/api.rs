//! JSON request handlers for the forecast and history endpoints.

use crate::application::forecast_service::ForecastService;
use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_history::{PriceHistory, round2};
use crate::domain::ml::prediction::Forecast;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// "Up" or "Down"
    pub prediction: String,
    /// Percent, two decimals
    pub probability_up: f64,
}

impl From<&Forecast> for PredictResponse {
    fn from(forecast: &Forecast) -> Self {
        Self {
            prediction: forecast.prediction.direction.as_str().to_string(),
            probability_up: round2(forecast.prediction.probability_up * 100.0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryRequest {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub dates: Vec<String>,
    pub close: Vec<f64>,
    pub period_high: f64,
    pub period_low: f64,
    pub current_price: f64,
    pub price_change: f64,
    pub change_percent: f64,
}

impl From<PriceHistory> for HistoryResponse {
    fn from(history: PriceHistory) -> Self {
        Self {
            dates: history.dates,
            close: history.close,
            period_high: history.period_high,
            period_low: history.period_low,
            current_price: history.current_price,
            price_change: history.price_change,
            change_percent: history.change_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failed request: HTTP-style status plus the JSON error body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
            },
        }
    }
}

/// Status code for a domain error.
pub fn status_code(error: &PredictionError) -> u16 {
    match error {
        PredictionError::NoData { .. } => 404,
        PredictionError::InsufficientHistory { .. } => 400,
        PredictionError::InvalidRequest { .. } => 400,
        PredictionError::Training { .. } => 500,
        PredictionError::InvalidSeries { .. } => 500,
        PredictionError::Upstream { .. } => 502,
    }
}

pub struct ForecastApi {
    service: ForecastService,
    default_ticker: String,
    default_period: Period,
}

impl ForecastApi {
    pub fn new(service: ForecastService, default_ticker: impl Into<String>, default_period: Period) -> Self {
        Self {
            service,
            default_ticker: default_ticker.into(),
            default_period,
        }
    }

    /// Trimmed, upper-cased ticker; the configured default when blank.
    fn ticker_or_default(&self, ticker: Option<&str>) -> String {
        ticker
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.default_ticker.as_str())
            .to_uppercase()
    }

    fn period_or_default(&self, period: Option<&str>) -> Result<Period, PredictionError> {
        match period.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => Period::from_str(raw),
            None => Ok(self.default_period),
        }
    }

    pub async fn predict(&self, request: PredictRequest) -> Result<PredictResponse, ApiError> {
        let ticker = self.ticker_or_default(request.ticker.as_deref());
        let forecast = async {
            let period = self.period_or_default(request.period.as_deref())?;
            self.service.predict(&ticker, period).await
        }
        .await
        .map_err(|e| ApiError::new(status_code(&e), format!("Prediction failed: {}", e)))?;

        Ok(PredictResponse::from(&forecast))
    }

    pub async fn history(&self, request: HistoryRequest) -> Result<HistoryResponse, ApiError> {
        let ticker = self.ticker_or_default(request.ticker.as_deref());
        let history = async {
            let range = self.period_or_default(request.range.as_deref())?;
            self.service.history(&ticker, range).await
        }
        .await
        .map_err(|e| match e {
            PredictionError::NoData { .. } => ApiError::new(404, "No data found for ticker."),
            other => ApiError::new(status_code(&other), other.to_string()),
        })?;

        Ok(HistoryResponse::from(history))
    }
}
