// core/src/api/catalog.rs

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::model::{EntityId, EquipmentList, NamedRef};

/// Source of the school -> grade -> class -> equipment hierarchy.
///
/// Unknown parent ids yield empty lists; an unknown class yields a generic
/// placeholder equipment list rather than an error.
#[async_trait]
pub trait CatalogSource: Send + Sync {
  async fn schools(&self) -> GatewayResult<Vec<NamedRef>>;

  async fn grades(&self, school_id: &EntityId) -> GatewayResult<Vec<NamedRef>>;

  async fn classes(&self, grade_id: &EntityId) -> GatewayResult<Vec<NamedRef>>;

  async fn equipment(&self, class_id: &EntityId) -> GatewayResult<EquipmentList>;
}
