use crate::domain::errors::PredictionError;
use crate::domain::market::price_series::{PriceBar, PriceSeries};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Yahoo chart API v8 response structures
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

impl ChartError {
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub events: Option<ChartEvents>,
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartEvents {
    #[serde(default)]
    pub dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    pub splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
pub struct DividendEvent {
    pub amount: f64,
    pub date: i64,
}

#[derive(Debug, Deserialize)]
pub struct SplitEvent {
    pub date: i64,
    pub numerator: f64,
    pub denominator: f64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Trading date of a bar, in the exchange's local time.
fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

fn value_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Converts a chart response into a daily series.
///
/// OHLC are scaled by `adjclose / close` so the series is split and dividend
/// adjusted. Bars with missing quote fields are skipped, and when the API
/// repeats a date (the live session bar) the later entry wins. A "Not Found"
/// chart error or a result without timestamps yields an empty series.
pub fn series_from_chart(ticker: &str, response: ChartResponse) -> Result<PriceSeries, PredictionError> {
    if let Some(error) = response.chart.error {
        if error.is_not_found() {
            warn!("Yahoo: no data for {}: {:?}", ticker, error.description);
            return Ok(PriceSeries::empty(ticker));
        }
        return Err(PredictionError::upstream(format!(
            "Yahoo chart error for {}: {} - {}",
            ticker,
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(ticker));
    };
    let Some(timestamps) = result.timestamp else {
        return Ok(PriceSeries::empty(ticker));
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose)
        .unwrap_or_default();
    let gmtoffset = result.meta.gmtoffset;

    let events = result.events.unwrap_or_default();
    let dividends: HashMap<NaiveDate, f64> = events
        .dividends
        .values()
        .filter_map(|d| Some((local_date(d.date, gmtoffset)?, d.amount)))
        .collect();
    let splits: HashMap<NaiveDate, f64> = events
        .splits
        .values()
        .filter(|s| s.denominator != 0.0)
        .filter_map(|s| Some((local_date(s.date, gmtoffset)?, s.numerator / s.denominator)))
        .collect();

    let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let fields = (
            local_date(ts, gmtoffset),
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        );
        let (Some(date), Some(open), Some(high), Some(low), Some(close)) = fields else {
            skipped += 1;
            continue;
        };
        let volume = value_at(&quote.volume, i).unwrap_or(0.0);

        let ratio = match value_at(&adjclose, i) {
            Some(adj) if close != 0.0 => adj / close,
            _ => 1.0,
        };

        let bar = PriceBar {
            date,
            open: open * ratio,
            high: high * ratio,
            low: low * ratio,
            close: close * ratio,
            volume,
            dividends: dividends.get(&date).copied(),
            stock_splits: splits.get(&date).copied(),
        };

        match bars.last_mut() {
            Some(last) if last.date == date => *last = bar,
            _ => bars.push(bar),
        }
    }

    if skipped > 0 {
        debug!("Yahoo: skipped {} incomplete bars for {}", skipped, ticker);
    }

    bars.sort_by_key(|b| b.date);
    bars.dedup_by(|later, earlier| {
        if later.date == earlier.date {
            std::mem::swap(later, earlier);
            true
        } else {
            false
        }
    });

    PriceSeries::new(ticker, bars)
}
