//! Shared HTTP client construction

use std::time::Duration;

/// Transport deadline for every outbound request. Sources add no timeout of
/// their own; a hung request fails only its own branch once this elapses.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("noyolo/", env!("CARGO_PKG_VERSION"));

/// Build the client used by remote sources and list loaders
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default HTTP client");
            reqwest::Client::new()
        })
}
