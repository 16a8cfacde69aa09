// core/src/config.rs

use crate::error::ConfigError;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const API_URL_VAR: &str = "SCHOOLCART_API_URL";
pub const HTTP_TIMEOUT_VAR: &str = "SCHOOLCART_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the backend, e.g. `http://127.0.0.1:8080`. No trailing slash.
  pub api_base_url: String,
  pub http_timeout: Duration,
}

impl ClientConfig {
  pub fn new(api_base_url: impl Into<String>) -> Self {
    Self {
      api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
      http_timeout: Duration::from_secs(10),
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.http_timeout = timeout;
    self
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok(); // Load .env file if present

    let api_base_url = env::var(API_URL_VAR)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .ok_or_else(|| {
        tracing::error!("{} is not set; every API request would fail.", API_URL_VAR);
        ConfigError::Missing {
          var: API_URL_VAR.to_string(),
        }
      })?;

    let timeout_secs = env::var(HTTP_TIMEOUT_VAR)
      .unwrap_or_else(|_| "10".to_string())
      .parse::<u64>()
      .map_err(|e| ConfigError::Invalid {
        var: HTTP_TIMEOUT_VAR.to_string(),
        message: e.to_string(),
      })?;

    tracing::info!(api_base_url = %api_base_url, "Client configuration loaded.");
    Ok(Self::new(api_base_url).with_timeout(Duration::from_secs(timeout_secs)))
  }
}
