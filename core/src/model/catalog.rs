// core/src/model/catalog.rs

use serde::{Deserialize, Serialize};

use super::ids::EntityId;

/// A school, grade or class as offered by the catalog and recorded on a cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
  pub id: EntityId,
  pub name: String,
}

impl NamedRef {
  pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
  pub id: EntityId,
  pub name: String,
  /// Suggested quantity from the class list.
  pub quantity: u32,
  #[serde(default)]
  pub required: bool,
}

/// The generated equipment list for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentList {
  pub class_id: EntityId,
  pub class_name: String,
  pub items: Vec<EquipmentItem>,
}
