// server/src/main.rs

use schoolcart_server::{run, AppConfig, AppState};
use std::net::TcpListener;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting school equipment server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let server_address = app_config.bind_address();
  let app_state = match AppState::new(app_config) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize application state.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  tracing::info!("Attempting to bind server to {}...", server_address);
  let listener = TcpListener::bind(&server_address)?;
  run(listener, app_state)?.await
}
