#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rustforecast::domain::market::price_series::{PriceBar, PriceSeries};

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// One bar per calendar day from `start`, with open = close and a one point range.
pub fn series_from_closes(ticker: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                start + Duration::days(i as i64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000_000.0,
            )
        })
        .collect();
    PriceSeries::new(ticker, bars).unwrap()
}

pub fn constant_series(ticker: &str, rows: usize) -> PriceSeries {
    series_from_closes(ticker, start_date(), &vec![100.0; rows])
}

/// Drifts upward in a repeating +1, +1, -1 pattern, so next-day targets
/// cycle 1, 1, 0 and the direction after each row is fully determined.
pub fn rising_series(ticker: &str, rows: usize) -> PriceSeries {
    let mut closes = Vec::with_capacity(rows);
    let mut close = 100.0;
    for i in 0..rows {
        closes.push(close);
        close += if i % 3 == 2 { -1.0 } else { 1.0 };
    }
    series_from_closes(ticker, start_date(), &closes)
}

/// Never falls: steps +1, +1, 0, so next-day targets cycle 1, 1, 0
/// (an unchanged close is not an up move).
pub fn non_decreasing_series(ticker: &str, rows: usize) -> PriceSeries {
    let mut closes = Vec::with_capacity(rows);
    let mut close = 100.0;
    for i in 0..rows {
        closes.push(close);
        close += if i % 3 == 2 { 0.0 } else { 1.0 };
    }
    series_from_closes(ticker, start_date(), &closes)
}

pub fn strictly_increasing_series(ticker: &str, rows: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..rows).map(|i| 100.0 + i as f64).collect();
    series_from_closes(ticker, start_date(), &closes)
}
