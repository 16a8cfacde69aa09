// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use schoolcart::{CartEntry, EntityId};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::auth_user::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct CartQuery {
  pub userid: Option<String>,
}

#[instrument(
    name = "handler::get_cart",
    skip(app_state, query, auth_user),
    fields(userid = %auth_user.user.userid),
    err(Display)
)]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  query: web::Query<CartQuery>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse> {
  let userid = auth_user.require_owner(query.userid.as_deref())?;
  Ok(HttpResponse::Ok().json(app_state.carts.get(&userid)))
}

#[instrument(
    name = "handler::replace_cart",
    skip(app_state, query, auth_user, req_payload),
    fields(userid = %auth_user.user.userid, count = req_payload.len()),
    err(Display)
)]
pub async fn replace_cart_handler(
  app_state: web::Data<AppState>,
  query: web::Query<CartQuery>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<Vec<CartEntry>>,
) -> Result<HttpResponse> {
  let userid = auth_user.require_owner(query.userid.as_deref())?;
  let stored = app_state.carts.replace(&userid, req_payload.into_inner())?;
  info!(count = stored.len(), "Cart replaced.");
  Ok(HttpResponse::Ok().json(stored))
}

#[instrument(
    name = "handler::upsert_entry",
    skip(app_state, entry_id, query, auth_user, req_payload),
    fields(userid = %auth_user.user.userid, entry_id = %entry_id.as_str()),
    err(Display)
)]
pub async fn upsert_entry_handler(
  app_state: web::Data<AppState>,
  entry_id: web::Path<String>,
  query: web::Query<CartQuery>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<CartEntry>,
) -> Result<HttpResponse> {
  let userid = auth_user.require_owner(query.userid.as_deref())?;
  let entry = req_payload.into_inner();
  if entry.id().as_str() != entry_id.as_str() {
    return Err(AppError::Validation(format!(
      "Entry id {} does not match path id {}",
      entry.id(),
      entry_id.as_str()
    )));
  }
  let stored = app_state.carts.upsert(&userid, entry)?;
  Ok(HttpResponse::Ok().json(stored))
}

#[instrument(
    name = "handler::delete_entry",
    skip(app_state, entry_id, query, auth_user),
    fields(userid = %auth_user.user.userid, entry_id = %entry_id.as_str()),
    err(Display)
)]
pub async fn delete_entry_handler(
  app_state: web::Data<AppState>,
  entry_id: web::Path<String>,
  query: web::Query<CartQuery>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse> {
  let userid = auth_user.require_owner(query.userid.as_deref())?;
  let stored = app_state.carts.delete(&userid, &EntityId::from(entry_id.as_str()));
  Ok(HttpResponse::Ok().json(stored))
}
