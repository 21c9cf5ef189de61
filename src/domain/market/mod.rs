// Market data domain
pub mod period;
pub mod price_history;
pub mod price_series;
