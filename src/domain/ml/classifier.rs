use crate::domain::errors::PredictionError;

/// Binary classifier over dense feature vectors.
///
/// Labels are `0` (Down) and `1` (Up). Any tree ensemble can stand behind this
/// trait without touching the pipeline.
pub trait Classifier: Send + Sync {
    /// Fit on row-major `features` with one label per row
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<(), PredictionError>;

    /// Probability (0.0 to 1.0) that `features` belongs to class `1`
    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
