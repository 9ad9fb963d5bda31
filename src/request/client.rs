use std::time::Duration;

use crate::config::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;

/// Shared client for the roster page and the chart API. Both reject requests
/// without a browser-like user agent.
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}
