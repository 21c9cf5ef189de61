use crate::config::{Config, ProviderKind};
use crate::domain::market::period::Period;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: &[&str] = &[
    "PRICE_PROVIDER",
    "YAHOO_BASE_URL",
    "HTTP_TIMEOUT_SECS",
    "HTTP_CONNECT_TIMEOUT_SECS",
    "CSV_DATA_DIR",
    "FOREST_N_TREES",
    "FOREST_MIN_SAMPLES_SPLIT",
    "FOREST_SEED",
    "DEFAULT_TICKER",
    "DEFAULT_PERIOD",
];

fn clear_env() {
    for var in VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.provider.kind, ProviderKind::Yahoo);
    assert_eq!(config.default_ticker, "^GSPC");
    assert_eq!(config.default_period, Period::Max);
    assert_eq!(config.model.n_trees, 200);
    assert_eq!(config.model.min_samples_split, 50);
    assert_eq!(config.forest_config().seed, 1);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe {
        env::set_var("PRICE_PROVIDER", "csv");
        env::set_var("CSV_DATA_DIR", "/tmp/prices");
        env::set_var("HTTP_TIMEOUT_SECS", "5");
        env::set_var("FOREST_N_TREES", "25");
        env::set_var("FOREST_SEED", "42");
        env::set_var("DEFAULT_TICKER", "AAPL");
        env::set_var("DEFAULT_PERIOD", "5 Years");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.provider.kind, ProviderKind::Csv);
    assert_eq!(config.provider.csv_data_dir, PathBuf::from("/tmp/prices"));
    assert_eq!(config.provider.http_timeout, Duration::from_secs(5));
    assert_eq!(config.forest_config().n_trees, 25);
    assert_eq!(config.forest_config().seed, 42);
    assert_eq!(config.default_ticker, "AAPL");
    assert_eq!(config.default_period, Period::FiveYears);

    clear_env();
}

#[test]
fn test_invalid_values_return_error() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    unsafe { env::set_var("PRICE_PROVIDER", "bloomberg") };
    assert!(Config::from_env().is_err());
    clear_env();

    unsafe { env::set_var("FOREST_N_TREES", "many") };
    let err_msg = format!("{:?}", Config::from_env().unwrap_err());
    assert!(err_msg.contains("FOREST_N_TREES"));
    clear_env();

    unsafe { env::set_var("FOREST_N_TREES", "0") };
    assert!(Config::from_env().is_err());
    clear_env();

    unsafe { env::set_var("DEFAULT_PERIOD", "fortnight") };
    let err_msg = format!("{:?}", Config::from_env().unwrap_err());
    assert!(err_msg.contains("DEFAULT_PERIOD"));
    clear_env();
}
