//! Shared HTTP client for every request of a run.
//!
//! Graph, the identity endpoint, the news feed and the image repository all
//! go through one [`reqwest::Client`] so connections are reused across users.

use std::time::Duration;

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared client.
///
/// The repository listing API rejects requests without a User-Agent, so one
/// is always set.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .user_agent(user_agent())
        .build()
}

/// User-Agent sent with every request.
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
