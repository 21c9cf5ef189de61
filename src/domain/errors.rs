use thiserror::Error;

/// Errors raised while loading prices, engineering features, training or predicting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("No data found for ticker '{ticker}'. Please check the ticker symbol.")]
    NoData { ticker: String },

    #[error("Not enough historical data for ticker '{ticker}': need at least {required} rows, got {actual}")]
    InsufficientHistory {
        ticker: String,
        required: usize,
        actual: usize,
    },

    #[error("Model training failed: {reason}")]
    Training { reason: String },

    #[error("Price data provider failed: {reason}")]
    Upstream { reason: String },

    #[error("Invalid price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl PredictionError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        PredictionError::Upstream {
            reason: reason.into(),
        }
    }

    pub fn training(reason: impl Into<String>) -> Self {
        PredictionError::Training {
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in logs and API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::NoData { .. } => "no_data",
            PredictionError::InsufficientHistory { .. } => "insufficient_history",
            PredictionError::Training { .. } => "training",
            PredictionError::Upstream { .. } => "upstream",
            PredictionError::InvalidSeries { .. } => "invalid_series",
            PredictionError::InvalidRequest { .. } => "invalid_request",
        }
    }
}
