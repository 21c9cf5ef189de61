//! Configuration module for rustforecast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: price data provider and model.

mod model_config;
mod provider_config;

pub use model_config::ModelEnvConfig;
pub use provider_config::{ProviderEnvConfig, ProviderKind};

use crate::application::ml::random_forest::ForestConfig;
use crate::domain::market::period::Period;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_TICKER: &str = "^GSPC";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderEnvConfig,
    pub model: ModelEnvConfig,
    /// Ticker used when a request omits one
    pub default_ticker: String,
    /// Period used when a request omits one
    pub default_period: Period,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let provider = ProviderEnvConfig::from_env().context("Failed to load provider config")?;
        let model = ModelEnvConfig::from_env().context("Failed to load model config")?;

        let default_ticker = env::var("DEFAULT_TICKER")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TICKER.to_string());

        let default_period = match env::var("DEFAULT_PERIOD") {
            Ok(raw) => Period::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid DEFAULT_PERIOD: {}", e))?,
            Err(_) => Period::default(),
        };

        Ok(Self {
            provider,
            model,
            default_ticker,
            default_period,
        })
    }

    pub fn forest_config(&self) -> ForestConfig {
        self.model.to_forest_config()
    }
}
