use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Cash dividend paid on this date, if the provider reports corporate actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividends: Option<f64>,
    /// Split ratio effective on this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_splits: Option<f64>,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            dividends: None,
            stock_splits: None,
        }
    }

    pub fn has_corporate_actions(&self) -> bool {
        self.dividends.is_some() || self.stock_splits.is_some()
    }
}

/// Daily price history of a single ticker, ordered by date.
///
/// Dates are strictly increasing; [`PriceSeries::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, PredictionError> {
        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(PredictionError::InvalidSeries {
                reason: format!(
                    "dates must be strictly increasing, found {} followed by {}",
                    pair[0].date, pair[1].date
                ),
            });
        }

        Ok(Self {
            ticker: ticker.into(),
            bars,
        })
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            bars: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Bars dated on or after `floor`.
    pub fn since(&self, floor: NaiveDate) -> PriceSeries {
        let start = self.bars.partition_point(|b| b.date < floor);
        PriceSeries {
            ticker: self.ticker.clone(),
            bars: self.bars[start..].to_vec(),
        }
    }

    /// Trailing `period` of the series, measured back from its last bar.
    pub fn window(&self, period: Period) -> PriceSeries {
        match self.last().and_then(|b| period.start_date(b.date)) {
            Some(start) => self.since(start),
            None => self.clone(),
        }
    }

    /// Copy of the series with dividend and split fields cleared.
    pub fn without_corporate_actions(&self) -> PriceSeries {
        let bars = self
            .bars
            .iter()
            .map(|b| PriceBar {
                dividends: None,
                stock_splits: None,
                ..b.clone()
            })
            .collect();

        PriceSeries {
            ticker: self.ticker.clone(),
            bars,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Highest high over the whole series
    pub fn period_high(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.high).reduce(f64::max)
    }

    /// Lowest low over the whole series
    pub fn period_low(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.low).reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
            close + 1.0,
            close - 1.0,
            close,
            1000.0,
        )
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let result = PriceSeries::new("TEST", vec![bar(2, 10.0), bar(1, 11.0)]);
        assert!(matches!(result, Err(PredictionError::InvalidSeries { .. })));
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let result = PriceSeries::new("TEST", vec![bar(1, 10.0), bar(1, 11.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_window_counts_back_from_last_bar() {
        let bars = (1..=20).map(|d| bar(d, 10.0 + d as f64)).collect();
        let series = PriceSeries::new("TEST", bars).unwrap();
        let recent = series.window(Period::FiveDays);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent.first().unwrap().close, 26.0);
        assert_eq!(series.window(Period::Max).len(), 20);
        assert!(PriceSeries::empty("TEST").window(Period::OneYear).is_empty());
    }

    #[test]
    fn test_since_is_inclusive() {
        let series = PriceSeries::new("TEST", vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)]).unwrap();
        let filtered = series.since(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.first().unwrap().close, 11.0);
    }

    #[test]
    fn test_high_low() {
        let series = PriceSeries::new("TEST", vec![bar(1, 10.0), bar(2, 15.0), bar(3, 12.0)]).unwrap();
        assert_eq!(series.period_high(), Some(16.0));
        assert_eq!(series.period_low(), Some(9.0));
        assert_eq!(PriceSeries::empty("TEST").period_high(), None);
    }

    #[test]
    fn test_without_corporate_actions() {
        let mut with_dividend = bar(1, 10.0);
        with_dividend.dividends = Some(0.24);
        let series = PriceSeries::new("TEST", vec![with_dividend]).unwrap();

        let stripped = series.without_corporate_actions();
        assert!(!stripped.bars()[0].has_corporate_actions());
        assert_eq!(stripped.bars()[0].close, 10.0);
    }
}
