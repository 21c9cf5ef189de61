use crate::application::forecast_service::ForecastService;
use crate::config::{Config, ProviderKind};
use crate::domain::ports::PriceDataProvider;
use crate::infrastructure::csv_provider::CsvPriceDataProvider;
use crate::infrastructure::yahoo::YahooPriceDataProvider;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_provider(config: &Config) -> Arc<dyn PriceDataProvider> {
        let provider = &config.provider;
        match provider.kind {
            ProviderKind::Yahoo => {
                info!("Using Yahoo chart API at {}", provider.yahoo_base_url);
                Arc::new(YahooPriceDataProvider::new(
                    provider.yahoo_base_url.clone(),
                    provider.http_timeout,
                    provider.http_connect_timeout,
                ))
            }
            ProviderKind::Csv => {
                info!("Using CSV price files from {}", provider.csv_data_dir.display());
                Arc::new(CsvPriceDataProvider::new(provider.csv_data_dir.clone()))
            }
        }
    }

    pub fn create_forecast_service(config: &Config) -> ForecastService {
        ForecastService::new(Self::create_provider(config), config.forest_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelEnvConfig, ProviderEnvConfig};
    use crate::domain::market::period::Period;

    fn config(kind: ProviderKind) -> Config {
        Config {
            provider: ProviderEnvConfig {
                kind,
                ..ProviderEnvConfig::default()
            },
            model: ModelEnvConfig::default(),
            default_ticker: "^GSPC".to_string(),
            default_period: Period::Max,
        }
    }

    #[test]
    fn test_creates_configured_provider() {
        assert_eq!(ServiceFactory::create_provider(&config(ProviderKind::Yahoo)).name(), "Yahoo Finance");
        assert_eq!(ServiceFactory::create_provider(&config(ProviderKind::Csv)).name(), "CSV");
    }

    #[test]
    fn test_forecast_service_uses_provider() {
        let service = ServiceFactory::create_forecast_service(&config(ProviderKind::Csv));
        assert_eq!(service.provider_name(), "CSV");
    }
}
