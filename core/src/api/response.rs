// core/src/api/response.rs

//! Turns HTTP responses into typed values or a normalized `GatewayError`.

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};

#[derive(Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

/// Picks the backend's `error` field out of a failed response body, falling
/// back to `fallback` when the body is not JSON or carries no message.
pub(crate) fn error_message(body: &[u8], fallback: &str) -> String {
  match serde_json::from_slice::<ErrorBody>(body) {
    Ok(ErrorBody { error: Some(msg) }) if !msg.trim().is_empty() => msg,
    Ok(_) => fallback.to_string(),
    Err(parse_err) => {
      debug!(error = %parse_err, "Error body is not JSON; using fallback message.");
      fallback.to_string()
    }
  }
}

async fn body_bytes(resp: Response, fallback: &str) -> GatewayResult<Vec<u8>> {
  resp
    .bytes()
    .await
    .map(|b| b.to_vec())
    .map_err(|source| GatewayError::Transport {
      message: fallback.to_string(),
      source,
    })
}

async fn failure(resp: Response, fallback: &str) -> GatewayError {
  let status = resp.status().as_u16();
  let message = match body_bytes(resp, fallback).await {
    Ok(body) => error_message(&body, fallback),
    Err(_) => fallback.to_string(),
  };
  warn!(status, message = %message, "Backend responded with an error.");
  GatewayError::Api { status, message }
}

/// Decodes a 2xx JSON body into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> GatewayResult<T> {
  if !resp.status().is_success() {
    return Err(failure(resp, fallback).await);
  }
  let body = body_bytes(resp, fallback).await?;
  serde_json::from_slice(&body).map_err(|source| GatewayError::Decode {
    message: fallback.to_string(),
    source,
  })
}

/// Checks the status only; the body may be empty.
pub(crate) async fn expect_success(resp: Response, fallback: &str) -> GatewayResult<()> {
  if !resp.status().is_success() {
    return Err(failure(resp, fallback).await);
  }
  Ok(())
}

pub(crate) fn transport(fallback: &str) -> impl FnOnce(reqwest::Error) -> GatewayError + '_ {
  move |source| GatewayError::Transport {
    message: fallback.to_string(),
    source,
  }
}
