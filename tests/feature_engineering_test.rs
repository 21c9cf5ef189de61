mod common;

use chrono::NaiveDate;
use common::{constant_series, rising_series, series_from_closes, start_date};
use rustforecast::application::ml::feature_engineering_service::FeatureEngineeringService;
use rustforecast::domain::errors::PredictionError;
use rustforecast::domain::market::price_series::PriceSeries;
use rustforecast::domain::ml::feature_registry::predictor_names;

#[test]
fn test_sixty_rows_keep_only_short_horizons() {
    let data = FeatureEngineeringService::new()
        .engineer(&constant_series("TEST", 60))
        .unwrap();

    assert_eq!(
        data.predictors,
        vec![
            "Close",
            "Volume",
            "Open",
            "High",
            "Low",
            "Close_Ratio_2",
            "Trend_2",
            "Close_Ratio_5",
            "Trend_5"
        ]
    );
}

#[test]
fn test_predictor_count_follows_row_count() {
    let service = FeatureEngineeringService::new();
    for rows in [50, 80, 300, 1100] {
        let data = service.engineer(&rising_series("TEST", rows)).unwrap();
        let horizons = (data.predictors.len() - 5) / 2;
        assert_eq!(data.predictors.len(), 5 + 2 * horizons);
        assert_eq!(data.predictors, predictor_names(rows));
    }
}

#[test]
fn test_equal_closes_label_down() {
    let data = FeatureEngineeringService::new()
        .engineer(&constant_series("TEST", 55))
        .unwrap();

    let target = data.table.target();
    assert!(target[..54].iter().all(|t| *t == Some(0)));
    assert_eq!(target[54], None);
}

#[test]
fn test_constant_closes_give_unit_ratio() {
    let service = FeatureEngineeringService::new();

    for (close, rows) in [(100.0, 80), (0.1, 3000), (37.37, 1200)] {
        let series = series_from_closes("TEST", start_date(), &vec![close; rows]);
        let data = service.engineer(&series).unwrap();

        for name in data.predictors.iter().filter(|n| n.starts_with("Close_Ratio_")) {
            let values = data.table.column(name).unwrap();
            let defined: Vec<f64> = values.iter().flatten().copied().collect();
            assert!(!defined.is_empty());
            assert!(
                defined.iter().all(|v| *v == 1.0),
                "{} not exactly 1.0 for close {}",
                name,
                close
            );
        }
    }
}

#[test]
fn test_bars_before_floor_are_dropped() {
    let closes: Vec<f64> = (0..110).map(|i| 50.0 + (i % 7) as f64).collect();
    let series = series_from_closes("TEST", NaiveDate::from_ymd_opt(1989, 11, 12).unwrap(), &closes);

    let data = FeatureEngineeringService::new().engineer(&series).unwrap();

    let floor = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    assert!(data.table.dates().iter().all(|d| *d >= floor));
    assert_eq!(data.table.len(), 60);
}

#[test]
fn test_empty_series_is_no_data() {
    let err = FeatureEngineeringService::new()
        .engineer(&PriceSeries::empty("NOPE"))
        .unwrap_err();
    assert_eq!(
        err,
        PredictionError::NoData {
            ticker: "NOPE".to_string()
        }
    );
}

#[test]
fn test_forty_nine_rows_is_insufficient() {
    let err = FeatureEngineeringService::new()
        .engineer(&constant_series("TEST", 49))
        .unwrap_err();
    assert!(matches!(
        err,
        PredictionError::InsufficientHistory {
            required: 50,
            actual: 49,
            ..
        }
    ));
}

#[test]
fn test_predictor_order_is_stable() {
    let service = FeatureEngineeringService::new();
    let series = rising_series("TEST", 300);
    let first = service.engineer(&series).unwrap();
    let second = service.engineer(&series).unwrap();
    assert_eq!(first.predictors, second.predictors);
    assert_eq!(first, second);
}

#[test]
fn test_live_row_is_preserved() {
    let series = rising_series("TEST", 120);
    let data = FeatureEngineeringService::new().engineer(&series).unwrap();
    let (training, live) = data.split().unwrap();

    assert_eq!(live.date, series.last().unwrap().date);
    assert!(training.dates.iter().all(|d| *d < live.date));
    assert_eq!(live.predictors, data.predictors);
    assert_eq!(training.predictors, data.predictors);
    assert!(training.features.iter().all(|row| row.len() == data.predictors.len()));
}

#[test]
fn test_longest_horizon_needs_ten_trainable_rows() {
    // Trend_1000 is first defined on row 1000, so 1010 rows leave only 9 complete rows
    let service = FeatureEngineeringService::new();
    let err = service.engineer(&rising_series("TEST", 1010)).unwrap_err();
    assert!(matches!(
        err,
        PredictionError::InsufficientHistory {
            required: 10,
            actual: 9,
            ..
        }
    ));
    assert!(service.engineer(&rising_series("TEST", 1011)).is_ok());
}

#[test]
fn test_custom_floor() {
    let service = FeatureEngineeringService::with_floor(start_date() + chrono::Duration::days(10));
    let data = service.engineer(&constant_series("TEST", 100)).unwrap();
    assert_eq!(data.table.len(), 90);
}
