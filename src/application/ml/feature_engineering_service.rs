use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_series::{PriceBar, PriceSeries};
use crate::domain::ml::feature_registry::{
    RAW_COLUMNS, active_horizons, close_ratio_column, trend_column,
};
use crate::domain::ml::feature_table::{FeatureTable, LiveRow, TrainingSet};
use crate::domain::ports::PriceDataProvider;
use chrono::NaiveDate;
use ta::Next;
use ta::indicators::SimpleMovingAverage;
use tracing::{debug, info};

/// Minimum rows left after the floor-date filter
pub const MIN_ROWS_AFTER_FLOOR: usize = 50;

/// Minimum trainable rows left after dropping incomplete ones
pub const MIN_TRAINING_ROWS: usize = 10;

/// Earliest date kept; older data is dropped to avoid regime drift.
pub fn default_history_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Feature table plus the ordered predictor names it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredData {
    pub table: FeatureTable,
    pub predictors: Vec<String>,
}

impl EngineeredData {
    /// Training slice (complete, labelled rows) and the held-out live row.
    pub fn split(&self) -> Result<(TrainingSet, LiveRow), PredictionError> {
        self.table
            .split()
            .ok_or_else(|| PredictionError::InsufficientHistory {
                ticker: self.table.ticker().to_string(),
                required: 1,
                actual: 0,
            })
    }
}

/// Close divided by its trailing `horizon`-day mean; undefined until the window is full.
///
/// The mean is accumulated on deviations from the first close, so a constant
/// series sums exact zeros and yields a ratio of exactly 1.0.
fn close_ratio(closes: &[f64], horizon: usize) -> Result<Vec<Option<f64>>, PredictionError> {
    let mut sma = SimpleMovingAverage::new(horizon).map_err(|e| PredictionError::InvalidSeries {
        reason: format!("invalid horizon {}: {:?}", horizon, e),
    })?;
    let reference = closes.first().copied().unwrap_or_default();

    Ok(closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let mean = reference + sma.next(close - reference);
            (i + 1 >= horizon && mean != 0.0).then(|| close / mean)
        })
        .collect())
}

/// Number of Up days among the `horizon` days before each row (today excluded).
fn trailing_trend(target: &[Option<u8>], horizon: usize) -> Vec<Option<f64>> {
    (0..target.len())
        .map(|i| {
            if i < horizon {
                return None;
            }
            target[i - horizon..i]
                .iter()
                .try_fold(0.0, |acc, t| t.map(|v| acc + f64::from(v)))
        })
        .collect()
}

/// 1 if the next close is strictly higher, 0 otherwise; undefined on the last day.
fn next_day_target(closes: &[f64]) -> Vec<Option<u8>> {
    (0..closes.len())
        .map(|i| closes.get(i + 1).map(|&next| u8::from(next > closes[i])))
        .collect()
}

fn raw_value(bar: &PriceBar, column: &str) -> Option<f64> {
    let value = match column {
        "Close" => bar.close,
        "Volume" => bar.volume,
        "Open" => bar.open,
        "High" => bar.high,
        "Low" => bar.low,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Builds the per-day feature table from a price series.
#[derive(Debug, Clone)]
pub struct FeatureEngineeringService {
    floor: NaiveDate,
}

impl Default for FeatureEngineeringService {
    fn default() -> Self {
        Self {
            floor: default_history_floor(),
        }
    }
}

impl FeatureEngineeringService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor(floor: NaiveDate) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> NaiveDate {
        self.floor
    }

    /// Fetches the ticker's daily history and engineers it.
    pub async fn load_and_engineer(
        &self,
        provider: &dyn PriceDataProvider,
        ticker: &str,
        period: Period,
    ) -> Result<EngineeredData, PredictionError> {
        info!(
            "FeatureEngineeringService: loading {} ({}) from {}",
            ticker,
            period,
            provider.name()
        );
        let series = provider.daily_history(ticker, period).await?;
        self.engineer(&series)
    }

    /// Derives the Target label and rolling features over the whole series.
    ///
    /// The last row is kept even though its Target is undefined; only the
    /// training slice drops incomplete rows.
    pub fn engineer(&self, series: &PriceSeries) -> Result<EngineeredData, PredictionError> {
        let ticker = series.ticker().to_string();
        if series.is_empty() {
            return Err(PredictionError::NoData { ticker });
        }

        let series = series.without_corporate_actions().since(self.floor);
        let row_count = series.len();
        if row_count < MIN_ROWS_AFTER_FLOOR {
            return Err(PredictionError::InsufficientHistory {
                ticker,
                required: MIN_ROWS_AFTER_FLOOR,
                actual: row_count,
            });
        }

        let bars = series.bars();
        let closes = series.closes();
        let target = next_day_target(&closes);

        let mut table = FeatureTable::new(ticker.clone(), series.dates(), target.clone());
        for &column in RAW_COLUMNS {
            let values = bars.iter().map(|b| raw_value(b, column)).collect();
            table.push_column(column, values);
        }

        let horizons = active_horizons(row_count);
        for &horizon in &horizons {
            table.push_column(close_ratio_column(horizon), close_ratio(&closes, horizon)?);
            table.push_column(trend_column(horizon), trailing_trend(&target, horizon));
        }

        let training_rows = table.training_set().len();
        debug!(
            "FeatureEngineeringService: {} rows since {}, horizons {:?}, {} trainable",
            row_count, self.floor, horizons, training_rows
        );

        if training_rows < MIN_TRAINING_ROWS {
            return Err(PredictionError::InsufficientHistory {
                ticker,
                required: MIN_TRAINING_ROWS,
                actual: training_rows,
            });
        }

        let predictors = table.column_names();
        Ok(EngineeredData { table, predictors })
    }
}
