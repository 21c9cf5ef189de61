pub mod api;

pub use api::{ErrorResponse, ForecastApi, HistoryRequest, HistoryResponse, PredictRequest, PredictResponse};
