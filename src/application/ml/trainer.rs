use super::random_forest::{ForestConfig, RandomForestClassifier};
use crate::domain::errors::PredictionError;
use crate::domain::ml::classifier::Classifier;
use crate::domain::ml::feature_table::TrainingSet;
use tracing::info;

/// Fits a fresh classifier for every request. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    config: ForestConfig,
}

impl ModelTrainer {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn train(&self, training: &TrainingSet) -> Result<Box<dyn Classifier>, PredictionError> {
        let mut model = RandomForestClassifier::new(self.config.clone());
        self.train_with(&mut model, training)?;
        Ok(Box::new(model))
    }

    /// Fits any [`Classifier`] on the training slice.
    pub fn train_with<C: Classifier + ?Sized>(
        &self,
        model: &mut C,
        training: &TrainingSet,
    ) -> Result<(), PredictionError> {
        if training.is_empty() {
            return Err(PredictionError::training("training data is empty"));
        }

        info!(
            "ModelTrainer: fitting {} on {} rows ({} Up / {} Down), {} predictors",
            model.name(),
            training.len(),
            training.up_count(),
            training.len() - training.up_count(),
            training.predictors.len()
        );

        model.fit(&training.features, &training.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_set(labels: Vec<u8>) -> TrainingSet {
        TrainingSet {
            predictors: vec!["Close".to_string()],
            dates: Vec::new(),
            features: (0..labels.len()).map(|i| vec![i as f64]).collect(),
            labels,
        }
    }

    #[test]
    fn test_train_returns_fitted_model() {
        let trainer = ModelTrainer::new(ForestConfig {
            n_trees: 10,
            min_samples_split: 2,
            ..Default::default()
        });
        let labels: Vec<u8> = (0..40).map(|i| u8::from(i >= 20)).collect();

        let model = trainer.train(&training_set(labels)).unwrap();
        let p = model.predict_probability(&[35.0]).unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!(p > 0.5);
    }

    #[test]
    fn test_empty_training_set_fails() {
        let trainer = ModelTrainer::default();
        let result = trainer.train(&TrainingSet::default());
        assert!(matches!(result, Err(PredictionError::Training { .. })));
    }

    #[test]
    fn test_single_class_fails() {
        let trainer = ModelTrainer::default();
        let result = trainer.train(&training_set(vec![0; 30]));
        assert!(matches!(result, Err(PredictionError::Training { .. })));
    }
}
