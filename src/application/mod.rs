// Feature engineering, training and inference
pub mod ml;

// Request orchestrator
pub mod forecast_service;
