// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Lets handlers use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::BadRequest().json(json!({"error": m}))
      }
      AppError::Auth(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::Unauthorized().json(json!({"error": m}))
      }
      AppError::Forbidden(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::Forbidden().json(json!({"error": m}))
      }
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_keeps_wrapped_app_errors() {
    let err: AppError = anyhow::Error::new(AppError::Forbidden("nope".to_string())).into();
    assert!(matches!(err, AppError::Forbidden(ref m) if m == "nope"));

    let err: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn status_codes_follow_variant() {
    assert_eq!(AppError::Validation(String::new()).error_response().status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::Auth(String::new()).error_response().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::Forbidden(String::new()).error_response().status(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::NotFound(String::new()).error_response().status(), StatusCode::NOT_FOUND);
  }
}
