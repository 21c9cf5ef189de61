use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Up when `probability_up >= 0.5`; an exact tie resolves to Up.
    pub fn from_probability(probability_up: f64) -> Self {
        if probability_up >= 0.5 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model output for the live row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub direction: Direction,
    /// In [0, 1]
    pub probability_up: f64,
}

impl Prediction {
    pub fn from_probability(probability_up: f64) -> Self {
        let probability_up = probability_up.clamp(0.0, 1.0);
        Self {
            direction: Direction::from_probability(probability_up),
            probability_up,
        }
    }

    pub fn probability_down(&self) -> f64 {
        1.0 - self.probability_up
    }

    /// Probability of the predicted direction
    pub fn confidence(&self) -> f64 {
        self.probability_up.max(self.probability_down())
    }
}

/// A complete next-day forecast for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub ticker: String,
    /// Date of the live row the forecast was made from
    pub as_of: NaiveDate,
    pub prediction: Prediction,
    pub training_rows: usize,
    pub predictors: Vec<String>,
}
