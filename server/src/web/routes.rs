// server/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, cart_handlers, catalog_handlers};

/// Largest accepted JSON body. Full-cart replacement carries every entry.
const JSON_BODY_LIMIT: usize = 1024 * 1024;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Extractor failures answer with the same `{"error": ...}` body as handlers.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .limit(JSON_BODY_LIMIT)
    .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).app_data(query_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Catalog
      .route("/schools", web::get().to(catalog_handlers::list_schools_handler))
      .route("/grades", web::get().to(catalog_handlers::list_grades_handler))
      .route("/classes", web::get().to(catalog_handlers::list_classes_handler))
      .route("/equipment", web::get().to(catalog_handlers::equipment_handler))
      // Authentication
      .route("/login", web::post().to(auth_handlers::login_handler))
      .route("/logout", web::post().to(auth_handlers::logout_handler))
      .route("/auth/status", web::get().to(auth_handlers::auth_status_handler))
      // Cart
      .service(
        web::resource("/cart")
          .route(web::get().to(cart_handlers::get_cart_handler))
          .route(web::post().to(cart_handlers::replace_cart_handler)),
      )
      .service(
        web::resource("/cart/entries/{entry_id}")
          .route(web::put().to(cart_handlers::upsert_entry_handler))
          .route(web::delete().to(cart_handlers::delete_entry_handler)),
      ),
  );
}
