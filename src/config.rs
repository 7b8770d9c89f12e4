/*!
Runtime configuration, read from the environment (and `.env`) with command line overrides applied by the binary
*/

use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::client::constants::{BASE_URL, REQUESTS_PER_SECOND, REQUEST_TIMEOUT};
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "STEAM_API_KEY";
pub const BASE_URL_VAR: &str = "STEAM_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "STEAM_API_TIMEOUT_SECS";
pub const RPS_VAR: &str = "STEAM_API_RPS";

#[derive(Clone, Debug)]
pub struct Config {
    /// Steam Web API key, sent as `key` on every endpoint call
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub requests_per_second: NonZeroU32,
}

impl Config {
    pub fn new(api_key: &str) -> Self {
        Config {
            api_key: api_key.to_string(),
            base_url: BASE_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            requests_per_second: REQUESTS_PER_SECOND,
        }
    }

    /**
    Build a config from process environment variables

    # Notes
    Call `dotenv::dotenv()` beforehand to pick up a `.env` file. The API key is not
    checked here so command line overrides can still supply it; call `validate()` last

    # Returns
    A config, or `ConfigError::InvalidValue` when a numeric variable does not parse
    */
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        let mut config = Config::new(&api_key);

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Ok(timeout) = env::var(TIMEOUT_VAR) {
            config.request_timeout = parse_timeout(&timeout)?;
        }
        if let Ok(rps) = env::var(RPS_VAR) {
            config.requests_per_second = parse_rps(&rps)?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                name: BASE_URL_VAR,
                value: self.base_url.clone(),
            });
        }
        Ok(())
    }
}

pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            name: TIMEOUT_VAR,
            value: value.to_string(),
        }),
    }
}

pub fn parse_rps(value: &str) -> Result<NonZeroU32, ConfigError> {
    value
        .trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ConfigError::InvalidValue {
            name: RPS_VAR,
            value: value.to_string(),
        })
}
