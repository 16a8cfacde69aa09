// server/src/web/auth_user.rs

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use schoolcart::{AuthUser, EntityId};
use tracing::warn;

use crate::errors::{AppError, Result};
use crate::services::SESSION_COOKIE;
use crate::state::AppState;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The user behind the request's session cookie.
///
/// Extraction fails with 401 when the cookie is missing or the session is unknown.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user: AuthUser,
  pub token: String,
}

impl AuthenticatedUser {
  /// Checks the `userid` query parameter against the session's user.
  pub fn require_owner(&self, userid: Option<&str>) -> Result<EntityId> {
    let userid = match userid.map(str::trim) {
      Some(raw) if !raw.is_empty() => EntityId::from(raw),
      _ => return Err(AppError::Validation("userid is required".to_string())),
    };
    if userid != self.user.userid {
      warn!(session_user = %self.user.userid, requested = %userid, "Cart access for another user.");
      return Err(AppError::Forbidden("Cannot access another user's cart".to_string()));
    }
    Ok(userid)
  }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))?;
  let token = req
    .cookie(SESSION_COOKIE)
    .map(|cookie| cookie.value().to_string())
    .ok_or_else(|| AppError::Auth(NOT_AUTHENTICATED.to_string()))?;
  let user = state
    .sessions
    .resolve(&token)
    .ok_or_else(|| AppError::Auth(NOT_AUTHENTICATED.to_string()))?;
  Ok(AuthenticatedUser { user, token })
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(authenticate(req))
  }
}
