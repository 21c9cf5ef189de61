pub mod market_data;
pub mod types;

pub use market_data::{DEFAULT_YAHOO_BASE_URL, YahooPriceDataProvider};
