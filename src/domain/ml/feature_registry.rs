/// Raw price columns, in the order they are fed to the model.
/// Any change here changes the meaning of every trained model.
pub const RAW_COLUMNS: &[&str] = &["Close", "Volume", "Open", "High", "Low"];

/// Trailing windows (in trading days) used for the rolling features.
pub const HORIZONS: &[usize] = &[2, 5, 60, 250, 1000];

pub const TARGET_COLUMN: &str = "Target";

pub fn close_ratio_column(horizon: usize) -> String {
    format!("Close_Ratio_{}", horizon)
}

pub fn trend_column(horizon: usize) -> String {
    format!("Trend_{}", horizon)
}

/// Horizons that fit in a table of `row_count` rows (strictly shorter than the table).
pub fn active_horizons(row_count: usize) -> Vec<usize> {
    HORIZONS.iter().copied().filter(|&h| h < row_count).collect()
}

/// Ordered predictor names for a table of `row_count` rows:
/// raw columns first, then `Close_Ratio_h`, `Trend_h` per ascending horizon.
pub fn predictor_names(row_count: usize) -> Vec<String> {
    let mut names: Vec<String> = RAW_COLUMNS.iter().map(|c| c.to_string()).collect();
    for horizon in active_horizons(row_count) {
        names.push(close_ratio_column(horizon));
        names.push(trend_column(horizon));
    }
    names
}
