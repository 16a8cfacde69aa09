// server/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use schoolcart::EntityId;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;

// --- Query DTOs ---
// Parameters are optional so a missing one produces our own 400 body.

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GradesQuery {
  pub school_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClassesQuery {
  pub grade_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
  pub class_id: Option<String>,
}

fn required(value: Option<&str>, name: &str) -> Result<EntityId> {
  match value.map(str::trim) {
    Some(raw) if !raw.is_empty() => Ok(EntityId::from(raw)),
    _ => Err(AppError::Validation(format!("{} is required", name))),
  }
}

async fn simulate_latency(app_state: &AppState) {
  let latency = app_state.config.mock_latency;
  if !latency.is_zero() {
    tokio::time::sleep(latency).await;
  }
}

#[instrument(name = "handler::schools", skip(app_state))]
pub async fn list_schools_handler(app_state: web::Data<AppState>) -> HttpResponse {
  simulate_latency(&app_state).await;
  HttpResponse::Ok().json(app_state.catalog.schools())
}

#[instrument(name = "handler::grades", skip(app_state), fields(school_id = ?query.school_id), err(Display))]
pub async fn list_grades_handler(
  app_state: web::Data<AppState>,
  query: web::Query<GradesQuery>,
) -> Result<HttpResponse> {
  let school_id = required(query.school_id.as_deref(), "schoolId")?;
  let grades = app_state.catalog.grades(&school_id);
  debug!(count = grades.len(), "Serving grades.");
  simulate_latency(&app_state).await;
  Ok(HttpResponse::Ok().json(grades))
}

#[instrument(name = "handler::classes", skip(app_state), fields(grade_id = ?query.grade_id), err(Display))]
pub async fn list_classes_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ClassesQuery>,
) -> Result<HttpResponse> {
  let grade_id = required(query.grade_id.as_deref(), "gradeId")?;
  let classes = app_state.catalog.classes(&grade_id);
  debug!(count = classes.len(), "Serving classes.");
  simulate_latency(&app_state).await;
  Ok(HttpResponse::Ok().json(classes))
}

#[instrument(name = "handler::equipment", skip(app_state), fields(class_id = ?query.class_id), err(Display))]
pub async fn equipment_handler(
  app_state: web::Data<AppState>,
  query: web::Query<EquipmentQuery>,
) -> Result<HttpResponse> {
  let class_id = required(query.class_id.as_deref(), "classId")?;
  let list = app_state.catalog.equipment(&class_id);
  simulate_latency(&app_state).await;
  Ok(HttpResponse::Ok().json(list))
}
