// server/src/web/handlers/auth_handlers.rs

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::services::SESSION_COOKIE;
use crate::state::AppState;
use crate::web::auth_user::AuthenticatedUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish()
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(username = %req_payload.username.trim())
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse> {
  let username = req_payload.username.trim();
  if username.is_empty() || req_payload.password.is_empty() {
    return Err(AppError::Validation("Username and password are required".to_string()));
  }

  let user = app_state.users.authenticate(username, &req_payload.password)?;
  let auth_user = user.auth_user();
  let token = app_state.sessions.open(auth_user.clone());
  info!(userid = %auth_user.userid, "Login successful.");

  Ok(HttpResponse::Ok().cookie(session_cookie(token)).json(auth_user))
}

/// Ends the caller's session if there is one. Always succeeds.
#[instrument(name = "handler::logout", skip(app_state, auth_user))]
pub async fn logout_handler(app_state: web::Data<AppState>, auth_user: Option<AuthenticatedUser>) -> HttpResponse {
  if let Some(auth_user) = auth_user {
    app_state.sessions.close(&auth_user.token);
  }
  let mut expired = session_cookie(String::new());
  expired.make_removal();
  HttpResponse::Ok().cookie(expired).finish()
}

#[instrument(name = "handler::auth_status", skip(auth_user), fields(userid = %auth_user.user.userid))]
pub async fn auth_status_handler(auth_user: AuthenticatedUser) -> HttpResponse {
  HttpResponse::Ok().json(auth_user.user)
}
