use reqwest::Client;
use std::time::Duration;

/// Browser-like agent; the chart API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; rustforecast)";

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client.
    ///
    /// Requests are not retried: a failed fetch is reported to the caller,
    /// which decides whether to try again.
    pub fn create_client(timeout: Duration, connect_timeout: Duration) -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
