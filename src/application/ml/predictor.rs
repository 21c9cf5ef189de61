use crate::domain::errors::PredictionError;
use crate::domain::ml::classifier::Classifier;
use crate::domain::ml::feature_table::LiveRow;
use crate::domain::ml::prediction::Prediction;
use tracing::{debug, warn};

/// Forward fill with the last defined value, then backward fill leading gaps.
pub fn fill_forward_then_backward(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut filled = values.to_vec();

    let mut last = None;
    for value in filled.iter_mut() {
        match value {
            Some(v) => last = Some(*v),
            None => *value = last,
        }
    }

    let mut next = None;
    for value in filled.iter_mut().rev() {
        match value {
            Some(v) => next = Some(*v),
            None => *value = next,
        }
    }

    filled
}

/// Scores the held-out live row with a fitted classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextDayPredictor;

impl NextDayPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Live feature vector with undefined values imputed from each column's history.
    pub fn impute(&self, live: &LiveRow) -> Result<Vec<f64>, PredictionError> {
        if live.is_complete() {
            return Ok(live.values.iter().flatten().copied().collect());
        }

        let mut row = Vec::with_capacity(live.values.len());
        for (i, value) in live.values.iter().enumerate() {
            if let Some(v) = value {
                row.push(*v);
                continue;
            }

            let history = live.history.get(i).map(Vec::as_slice).unwrap_or(&[]);
            let imputed = fill_forward_then_backward(history).last().copied().flatten();
            match imputed {
                Some(v) => {
                    warn!(
                        "NextDayPredictor: imputed undefined {} on {} with {:.4}",
                        live.predictors[i], live.date, v
                    );
                    row.push(v);
                }
                None => {
                    return Err(PredictionError::InvalidSeries {
                        reason: format!("no defined value for predictor {}", live.predictors[i]),
                    });
                }
            }
        }

        Ok(row)
    }

    pub fn predict(
        &self,
        model: &dyn Classifier,
        live: &LiveRow,
    ) -> Result<Prediction, PredictionError> {
        let features = self.impute(live)?;
        let probability_up = model.predict_probability(&features)?;
        let prediction = Prediction::from_probability(probability_up);

        debug!(
            "NextDayPredictor: {} for {} (p_up={:.4})",
            prediction.direction, live.date, prediction.probability_up
        );

        Ok(prediction)
    }
}
