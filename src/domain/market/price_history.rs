use super::price_series::PriceSeries;
use crate::domain::errors::PredictionError;
use serde::{Deserialize, Serialize};

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Chart-ready summary of a ticker's closing prices over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub ticker: String,
    /// `YYYY-MM-DD`
    pub dates: Vec<String>,
    pub close: Vec<f64>,
    pub period_high: f64,
    pub period_low: f64,
    pub current_price: f64,
    /// Change of the last close against the previous one (0 with a single bar)
    pub price_change: f64,
    pub change_percent: f64,
}

impl PriceHistory {
    pub fn from_series(series: &PriceSeries) -> Result<Self, PredictionError> {
        let (Some(last), Some(high), Some(low)) =
            (series.last(), series.period_high(), series.period_low())
        else {
            return Err(PredictionError::NoData {
                ticker: series.ticker().to_string(),
            });
        };

        let bars = series.bars();
        let (price_change, change_percent) = match bars.len().checked_sub(2).map(|i| &bars[i]) {
            Some(previous) if previous.close != 0.0 => {
                let change = last.close - previous.close;
                (change, change / previous.close * 100.0)
            }
            _ => (0.0, 0.0),
        };

        Ok(Self {
            ticker: series.ticker().to_string(),
            dates: bars
                .iter()
                .map(|b| b.date.format("%Y-%m-%d").to_string())
                .collect(),
            close: bars.iter().map(|b| round2(b.close)).collect(),
            period_high: round2(high),
            period_low: round2(low),
            current_price: round2(last.close),
            price_change: round2(price_change),
            change_percent: round2(change_percent),
        })
    }
}
