use crate::application::ml::feature_engineering_service::FeatureEngineeringService;
use crate::application::ml::predictor::NextDayPredictor;
use crate::application::ml::random_forest::ForestConfig;
use crate::application::ml::trainer::ModelTrainer;
use crate::domain::errors::PredictionError;
use crate::domain::market::period::Period;
use crate::domain::market::price_history::PriceHistory;
use crate::domain::ml::prediction::Forecast;
use crate::domain::ports::PriceDataProvider;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs the load → engineer → train → predict pipeline for one request.
///
/// Every call builds its own feature table and model; the service itself
/// holds no per-request state.
pub struct ForecastService {
    provider: Arc<dyn PriceDataProvider>,
    feature_engineering: FeatureEngineeringService,
    trainer: ModelTrainer,
    predictor: NextDayPredictor,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn PriceDataProvider>, forest: ForestConfig) -> Self {
        Self {
            provider,
            feature_engineering: FeatureEngineeringService::default(),
            trainer: ModelTrainer::new(forest),
            predictor: NextDayPredictor::new(),
        }
    }

    pub fn with_feature_engineering(mut self, feature_engineering: FeatureEngineeringService) -> Self {
        self.feature_engineering = feature_engineering;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn predict(&self, ticker: &str, period: Period) -> Result<Forecast, PredictionError> {
        let started = Instant::now();
        let result = self.run_pipeline(ticker, period).await;

        match &result {
            Ok(forecast) => info!(
                "ForecastService: {} -> {} (p_up={:.4}, {} training rows, {} ms)",
                ticker,
                forecast.prediction.direction,
                forecast.prediction.probability_up,
                forecast.training_rows,
                started.elapsed().as_millis()
            ),
            Err(e) => warn!("ForecastService: prediction for {} failed: {}", ticker, e),
        }

        result
    }

    async fn run_pipeline(&self, ticker: &str, period: Period) -> Result<Forecast, PredictionError> {
        let data = self
            .feature_engineering
            .load_and_engineer(self.provider.as_ref(), ticker, period)
            .await?;

        let (training, live) = data.split()?;
        let model = self.trainer.train(&training)?;
        let prediction = self.predictor.predict(model.as_ref(), &live)?;

        Ok(Forecast {
            ticker: ticker.to_string(),
            as_of: live.date,
            prediction,
            training_rows: training.len(),
            predictors: data.predictors,
        })
    }

    pub async fn history(&self, ticker: &str, range: Period) -> Result<PriceHistory, PredictionError> {
        let series = self.provider.daily_history(ticker, range).await?;
        info!(
            "ForecastService: {} bars of {} history for {}",
            series.len(),
            range,
            ticker
        );
        PriceHistory::from_series(&series)
    }
}
