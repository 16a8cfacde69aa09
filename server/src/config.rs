// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Artificial delay on catalog responses, mimicking a slow data source.
  pub mock_latency: Duration,

  // Seeded account for the demo login.
  pub demo_username: String,
  pub demo_password: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let mock_latency_ms = get_env("MOCK_LATENCY_MS")
      .unwrap_or_else(|_| "300".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid MOCK_LATENCY_MS: {}", e)))?;

    let demo_username = get_env("DEMO_USERNAME").unwrap_or_else(|_| "demo".to_string());
    let demo_password = get_env("DEMO_PASSWORD")?;
    if demo_password.is_empty() {
      return Err(AppError::Config("DEMO_PASSWORD must not be empty".to_string()));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      mock_latency: Duration::from_millis(mock_latency_ms),
      demo_username,
      demo_password,
    })
  }

  /// Configuration for in-process use: no latency, ephemeral port.
  pub fn for_tests(demo_username: &str, demo_password: &str) -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      mock_latency: Duration::ZERO,
      demo_username: demo_username.to_string(),
      demo_password: demo_password.to_string(),
    }
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
