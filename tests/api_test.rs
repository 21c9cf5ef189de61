mod common;

use common::{rising_series, series_from_closes, start_date};
use rustforecast::application::forecast_service::ForecastService;
use rustforecast::application::ml::random_forest::ForestConfig;
use rustforecast::domain::market::period::Period;
use rustforecast::infrastructure::MockPriceDataProvider;
use rustforecast::interfaces::api::{ForecastApi, HistoryRequest, PredictRequest};
use std::sync::Arc;

fn api(provider: MockPriceDataProvider) -> ForecastApi {
    let service = ForecastService::new(Arc::new(provider), ForestConfig::default());
    ForecastApi::new(service, "^GSPC", Period::Max)
}

#[tokio::test]
async fn test_predict_response_in_percent() {
    let api = api(MockPriceDataProvider::with_series(rising_series("^GSPC", 901)));

    let response = api.predict(PredictRequest::default()).await.unwrap();

    assert_eq!(response.prediction, "Up");
    assert!(response.probability_up >= 50.0 && response.probability_up <= 100.0);
    assert_eq!(response.probability_up, (response.probability_up * 100.0).round() / 100.0);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["prediction"], "Up");
    assert!(json["probability_up"].is_number());
}

#[tokio::test]
async fn test_predict_error_body() {
    let api = api(MockPriceDataProvider::new());

    let err = api
        .predict(PredictRequest {
            ticker: Some("NOPE".to_string()),
            period: Some("1y".to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, 404);
    let json = serde_json::to_value(&err.body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("NOPE"));
}

#[test]
fn test_history_rounds_and_summarises() {
    let series = series_from_closes("AAPL", start_date(), &[10.004, 12.346, 11.0]);
    let api = api(MockPriceDataProvider::with_series(series));

    let response = tokio_test::block_on(api.history(HistoryRequest {
        ticker: Some("AAPL".to_string()),
        range: Some("max".to_string()),
    }))
    .unwrap();

    assert_eq!(response.dates, vec!["2020-01-01", "2020-01-02", "2020-01-03"]);
    assert_eq!(response.close, vec![10.0, 12.35, 11.0]);
    assert_eq!(response.period_high, 13.35);
    assert_eq!(response.period_low, 9.0);
    assert_eq!(response.current_price, 11.0);
}

#[test]
fn test_history_request_json() {
    let request: HistoryRequest = serde_json::from_str(r#"{"ticker":"MSFT","range":"5y"}"#).unwrap();
    assert_eq!(request.ticker.as_deref(), Some("MSFT"));
    assert_eq!(request.range.as_deref(), Some("5y"));
}
