use std::time::Duration;

use serde::Serialize;

use crate::error::ApiError;

/// Query string shared by every endpoint, `steamids` and `steamid` are mutually exclusive
#[derive(Serialize)]
pub(super) struct Query<'a> {
    pub(super) key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) steamids: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) steamid: Option<&'a str>,
    pub(super) format: &'static str,
}

/**
INTERNAL: Build the HTTP client with default settings

# Arguments
- `timeout`: Upper bound for a whole request, surfaces as an ordinary request error

# Returns
- A `reqwest::Client` identifying itself by crate name and version
*/
pub(super) fn build_http(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Unknown(format!("Unable to build HTTP client: {}", e)))
}
