//! Random forest configuration parsing from environment variables.

use crate::application::ml::random_forest::ForestConfig;
use anyhow::{Context, Result, ensure};
use std::env;

/// Model environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEnvConfig {
    pub n_trees: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        let forest = ForestConfig::default();
        Self {
            n_trees: forest.n_trees,
            min_samples_split: forest.min_samples_split,
            seed: forest.seed,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let n_trees = match env::var("FOREST_N_TREES") {
            Ok(v) => v
                .parse::<usize>()
                .context("Failed to parse FOREST_N_TREES - must be a positive integer")?,
            Err(_) => defaults.n_trees,
        };
        ensure!(n_trees > 0, "FOREST_N_TREES must be at least 1");

        let min_samples_split = match env::var("FOREST_MIN_SAMPLES_SPLIT") {
            Ok(v) => v
                .parse::<usize>()
                .context("Failed to parse FOREST_MIN_SAMPLES_SPLIT - must be a positive integer")?,
            Err(_) => defaults.min_samples_split,
        };
        ensure!(min_samples_split >= 2, "FOREST_MIN_SAMPLES_SPLIT must be at least 2");

        let seed = match env::var("FOREST_SEED") {
            Ok(v) => v
                .parse::<u64>()
                .context("Failed to parse FOREST_SEED - must be an unsigned integer")?,
            Err(_) => defaults.seed,
        };

        Ok(Self {
            n_trees,
            min_samples_split,
            seed,
        })
    }

    pub fn to_forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees: self.n_trees,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
            ..ForestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::random_forest::ClassWeight;

    #[test]
    fn test_model_defaults_match_forest() {
        let config = ModelEnvConfig::default();
        assert_eq!(config.n_trees, 200);
        assert_eq!(config.min_samples_split, 50);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn test_to_forest_config_keeps_balanced_weights() {
        let forest = ModelEnvConfig {
            n_trees: 10,
            min_samples_split: 4,
            seed: 7,
        }
        .to_forest_config();
        assert_eq!(forest.n_trees, 10);
        assert_eq!(forest.min_samples_split, 4);
        assert_eq!(forest.seed, 7);
        assert_eq!(forest.class_weight, ClassWeight::Balanced);
        assert!(forest.bootstrap);
    }
}
