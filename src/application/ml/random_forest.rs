//! Random forest classifier with class-balanced sample weights.

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::domain::errors::PredictionError;
use crate::domain::ml::classifier::Classifier;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

/// How each class is weighted during fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassWeight {
    Uniform,
    /// `n_samples / (n_classes * n_class_samples)` for each class
    Balanced,
}

/// Random forest configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Minimum samples required to split an internal node
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Maximum depth of each tree (None = unlimited)
    pub max_depth: Option<usize>,
    /// Features drawn per split (None = sqrt of total)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    pub class_weight: ClassWeight,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            min_samples_split: 50,
            min_samples_leaf: 1,
            max_depth: None,
            max_features: None,
            bootstrap: true,
            class_weight: ClassWeight::Balanced,
            seed: 1,
        }
    }
}

pub struct RandomForestClassifier {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForestClassifier {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn class_weights(&self, labels: &[u8]) -> [f64; 2] {
        match self.config.class_weight {
            ClassWeight::Uniform => [1.0, 1.0],
            ClassWeight::Balanced => {
                let n = labels.len() as f64;
                let up = labels.iter().filter(|&&l| l == 1).count() as f64;
                let down = n - up;
                [n / (2.0 * down), n / (2.0 * up)]
            }
        }
    }

    fn validate(features: &[Vec<f64>], labels: &[u8]) -> Result<usize, PredictionError> {
        if features.is_empty() || labels.is_empty() {
            return Err(PredictionError::training("training data is empty"));
        }
        if features.len() != labels.len() {
            return Err(PredictionError::training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(label) = labels.iter().find(|&&l| l > 1) {
            return Err(PredictionError::training(format!(
                "labels must be 0 or 1, found {}",
                label
            )));
        }

        let n_features = features[0].len();
        if n_features == 0 {
            return Err(PredictionError::training("feature rows are empty"));
        }
        if features.iter().any(|row| row.len() != n_features) {
            return Err(PredictionError::training("feature rows have different lengths"));
        }
        if features.iter().flatten().any(|v| !v.is_finite()) {
            return Err(PredictionError::training("features contain non-finite values"));
        }

        let up = labels.iter().filter(|&&l| l == 1).count();
        if up == 0 || up == labels.len() {
            return Err(PredictionError::training(format!(
                "training labels contain a single class ({} rows, all {})",
                labels.len(),
                if up == 0 { "Down" } else { "Up" }
            )));
        }

        Ok(n_features)
    }
}

impl Classifier for RandomForestClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<(), PredictionError> {
        let n_features = Self::validate(features, labels)?;
        let n_samples = labels.len();
        let class_weights = self.class_weights(labels);

        // Default: sqrt of the feature count, as for classification forests
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| ((n_features as f64).sqrt() as usize).max(1));

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut trees = Vec::with_capacity(self.config.n_trees);

        for _ in 0..self.config.n_trees {
            let tree_seed = rng.next_u64();

            let mut counts = vec![0u32; n_samples];
            if self.config.bootstrap {
                for _ in 0..n_samples {
                    counts[rng.random_range(0..n_samples)] += 1;
                }
            } else {
                counts.fill(1);
            }

            let weights: Vec<f64> = counts
                .iter()
                .zip(labels)
                .map(|(&c, &l)| f64::from(c) * class_weights[usize::from(l)])
                .collect();
            let sample: Vec<usize> = (0..n_samples).filter(|&i| counts[i] > 0).collect();

            let mut tree = DecisionTree::new(TreeConfig {
                min_samples_split: self.config.min_samples_split,
                min_samples_leaf: self.config.min_samples_leaf,
                max_depth: self.config.max_depth,
                max_features: Some(max_features),
                seed: tree_seed,
            });
            tree.fit(features, labels, &weights, &sample);
            trees.push(tree);
        }

        debug!(
            "RandomForestClassifier: fitted {} trees on {} rows x {} features (max_features={})",
            trees.len(),
            n_samples,
            n_features,
            max_features
        );

        self.trees = trees;
        self.n_features = n_features;
        Ok(())
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if self.trees.is_empty() {
            return Err(PredictionError::training("model has not been fitted"));
        }
        if features.len() != self.n_features {
            return Err(PredictionError::training(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree
                .predict_probability(features)
                .ok_or_else(|| PredictionError::training("tree has not been fitted"))?;
        }

        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "Balanced Random Forest"
    }
}
