use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_series::{PriceBar, PriceSeries};
use crate::domain::ports::PriceDataProvider;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: f64,
    #[serde(rename = "Dividends", default)]
    dividends: Option<f64>,
    #[serde(rename = "Stock Splits", default)]
    stock_splits: Option<f64>,
}

/// Accepts `2024-01-02` as well as exported timestamps such as
/// `2024-01-02 00:00:00-05:00`; only the calendar date is kept.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Parses CSV text with a `Date,Open,High,Low,Close,Volume` header and
/// optional `Dividends` and `Stock Splits` columns. Rows may be in any order.
pub fn parse_price_csv(ticker: &str, content: &str) -> Result<PriceSeries, PredictionError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut bars = Vec::new();
    for (line, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = record.map_err(|e| PredictionError::InvalidSeries {
            reason: format!("{} row {}: {}", ticker, line + 1, e),
        })?;
        let date = parse_date(&row.date).ok_or_else(|| PredictionError::InvalidSeries {
            reason: format!("{} row {}: invalid date {:?}", ticker, line + 1, row.date),
        })?;

        let mut bar = PriceBar::new(date, row.open, row.high, row.low, row.close, row.volume);
        bar.dividends = row.dividends;
        bar.stock_splits = row.stock_splits;
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.date);
    PriceSeries::new(ticker, bars)
}

/// Reads daily history from `<dir>/<TICKER>.csv`.
///
/// A missing file behaves like an unknown ticker and yields an empty series.
pub struct CsvPriceDataProvider {
    data_dir: PathBuf,
}

impl CsvPriceDataProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File holding `ticker`, or `None` when the ticker is not a plain file
    /// name (separators, `..`, absolute paths) and would leave `data_dir`.
    pub fn path_for(&self, ticker: &str) -> Option<PathBuf> {
        if ticker.is_empty() || ticker.contains(['/', '\\']) || ticker.contains("..") {
            return None;
        }

        let file_name = format!("{}.csv", ticker);
        let mut components = Path::new(&file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.data_dir.join(file_name)),
            _ => None,
        }
    }
}

#[async_trait]
impl PriceDataProvider for CsvPriceDataProvider {
    async fn daily_history(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<PriceSeries, PredictionError> {
        let Some(path) = self.path_for(ticker) else {
            warn!("CsvPriceDataProvider: rejected ticker {:?}", ticker);
            return Ok(PriceSeries::empty(ticker));
        };
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("CsvPriceDataProvider: no file for {} at {}", ticker, path.display());
                return Ok(PriceSeries::empty(ticker));
            }
            Err(e) => {
                return Err(PredictionError::upstream(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let series = parse_price_csv(ticker, &content)?.window(period);
        debug!(
            "CsvPriceDataProvider: {} bars for {} ({})",
            series.len(),
            ticker,
            period
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "CSV"
    }
}
