use crate::domain::errors::PredictionError;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback window requested from the price data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    #[default]
    Max,
}

impl Period {
    /// Range string understood by the Yahoo chart API
    pub fn as_range_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }

    /// Human label, as offered by the period selector of the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneDay => "1 Day",
            Period::FiveDays => "5 Days",
            Period::OneMonth => "1 Month",
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
            Period::TwoYears => "2 Years",
            Period::FiveYears => "5 Years",
            Period::TenYears => "10 Years",
            Period::YearToDate => "Year to Date",
            Period::Max => "Max",
        }
    }

    pub fn all() -> Vec<Period> {
        vec![
            Period::OneDay,
            Period::FiveDays,
            Period::OneMonth,
            Period::ThreeMonths,
            Period::SixMonths,
            Period::OneYear,
            Period::TwoYears,
            Period::FiveYears,
            Period::TenYears,
            Period::YearToDate,
            Period::Max,
        ]
    }

    /// First date (inclusive) covered by this period when it ends on `end`.
    ///
    /// Returns `None` for [`Period::Max`], which has no lower bound.
    pub fn start_date(&self, end: NaiveDate) -> Option<NaiveDate> {
        let months = |m: u32| end.checked_sub_months(Months::new(m));
        let days = |d: u64| end.checked_sub_days(Days::new(d));

        match self {
            Period::OneDay => Some(end),
            Period::FiveDays => days(4),
            Period::OneMonth => months(1),
            Period::ThreeMonths => months(3),
            Period::SixMonths => months(6),
            Period::OneYear => months(12),
            Period::TwoYears => months(24),
            Period::FiveYears => months(60),
            Period::TenYears => months(120),
            Period::YearToDate => NaiveDate::from_ymd_opt(end.year(), 1, 1),
            Period::Max => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_range_str())
    }
}

impl FromStr for Period {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Some(period) = Period::all()
            .into_iter()
            .find(|p| p.as_range_str() == normalized || p.label().to_lowercase() == normalized)
        {
            return Ok(period);
        }

        Err(PredictionError::InvalidRequest {
            reason: format!(
                "Invalid period: {}. Must be one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max",
                s
            ),
        })
    }
}
