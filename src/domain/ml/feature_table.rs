use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named predictor column. `None` marks a value that is undefined for that day
/// (not enough trailing history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Per-day feature table derived from a price series.
///
/// Stored column-major. The final row is the live row: its `Target` is always
/// undefined because there is no next day to compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    ticker: String,
    dates: Vec<NaiveDate>,
    columns: Vec<FeatureColumn>,
    target: Vec<Option<u8>>,
}

impl FeatureTable {
    pub fn new(ticker: impl Into<String>, dates: Vec<NaiveDate>, target: Vec<Option<u8>>) -> Self {
        debug_assert_eq!(dates.len(), target.len());
        Self {
            ticker: ticker.into(),
            dates,
            columns: Vec::new(),
            target,
        }
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.dates.len());
        self.columns.push(FeatureColumn {
            name: name.into(),
            values,
        });
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn target(&self) -> &[Option<u8>] {
        &self.target
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Feature vector of row `index`, or `None` if any column is undefined there.
    pub fn complete_row(&self, index: usize) -> Option<Vec<f64>> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).copied().flatten())
            .collect()
    }

    /// Rows usable for training: every column and the target defined.
    /// The live row never qualifies since its target is undefined.
    pub fn training_set(&self) -> TrainingSet {
        let mut set = TrainingSet {
            predictors: self.column_names(),
            dates: Vec::new(),
            features: Vec::new(),
            labels: Vec::new(),
        };

        let last = self.len().saturating_sub(1);
        for index in 0..last {
            let Some(label) = self.target[index] else {
                continue;
            };
            if let Some(row) = self.complete_row(index) {
                set.dates.push(self.dates[index]);
                set.features.push(row);
                set.labels.push(label);
            }
        }

        set
    }

    /// The most recent row together with the history of every column,
    /// kept whole so that undefined live values can be imputed later.
    pub fn live_row(&self) -> Option<LiveRow> {
        let index = self.len().checked_sub(1)?;
        Some(LiveRow {
            date: self.dates[index],
            predictors: self.column_names(),
            values: self.columns.iter().map(|c| c.values[index]).collect(),
            history: self.columns.iter().map(|c| c.values.clone()).collect(),
        })
    }

    /// Splits into the training slice and the held-out live row.
    pub fn split(&self) -> Option<(TrainingSet, LiveRow)> {
        let live = self.live_row()?;
        Some((self.training_set(), live))
    }
}

/// Labelled rows ready for fitting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingSet {
    pub predictors: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows labelled Up
    pub fn up_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }
}

/// The held-out row used for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRow {
    pub date: NaiveDate,
    pub predictors: Vec<String>,
    pub values: Vec<Option<f64>>,
    /// Full history of each predictor column, the live value last
    pub history: Vec<Vec<Option<f64>>>,
}

impl LiveRow {
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}
