// server/src/lib.rs

//! HTTP backend for the school equipment cart: a mock catalog, demo login
//! with cookie sessions, and per-user cart storage.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use actix_web::dev::Server;
use actix_web::{web as actix_data, App, HttpServer};
use std::net::TcpListener;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;

/// Starts serving on an already bound listener.
///
/// Binding is left to the caller so tests can use port 0 and read back the
/// assigned address.
pub fn run(listener: TcpListener, app_state: AppState) -> std::io::Result<Server> {
  let server = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .listen(listener)?
  .run();
  Ok(server)
}
