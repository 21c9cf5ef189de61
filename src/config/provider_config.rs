//! Price data provider configuration parsing from environment variables.

use crate::infrastructure::yahoo::DEFAULT_YAHOO_BASE_URL;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Source of daily price history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "csv" => Ok(ProviderKind::Csv),
            _ => anyhow::bail!("Invalid PRICE_PROVIDER: {}. Must be 'yahoo' or 'csv'", s),
        }
    }
}

/// Provider environment configuration
#[derive(Debug, Clone)]
pub struct ProviderEnvConfig {
    pub kind: ProviderKind,
    pub yahoo_base_url: String,
    pub http_timeout: Duration,
    pub http_connect_timeout: Duration,
    pub csv_data_dir: PathBuf,
}

impl Default for ProviderEnvConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            http_connect_timeout: Duration::from_secs(10),
            csv_data_dir: PathBuf::from("data"),
        }
    }
}

impl ProviderEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let kind = ProviderKind::from_str(
            &env::var("PRICE_PROVIDER").unwrap_or_else(|_| "yahoo".to_string()),
        )?;

        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("Failed to parse HTTP_TIMEOUT_SECS - must be a whole number of seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let http_connect_timeout = env::var("HTTP_CONNECT_TIMEOUT_SECS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("Failed to parse HTTP_CONNECT_TIMEOUT_SECS - must be a whole number of seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_connect_timeout);

        Ok(Self {
            kind,
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            http_timeout,
            http_connect_timeout,
            csv_data_dir: env::var("CSV_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_data_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!(ProviderKind::from_str("yahoo").unwrap(), ProviderKind::Yahoo);
        assert_eq!(ProviderKind::from_str("CSV").unwrap(), ProviderKind::Csv);
        assert!(ProviderKind::from_str("bloomberg").is_err());
    }

    #[test]
    fn test_provider_defaults() {
        let config = ProviderEnvConfig::default();
        assert_eq!(config.kind, ProviderKind::Yahoo);
        assert_eq!(config.yahoo_base_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }
}
