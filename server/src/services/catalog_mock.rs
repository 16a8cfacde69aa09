// server/src/services/catalog_mock.rs

//! Canned school / grade / class / equipment tables.
//!
//! Stands in for a real catalog database. Lookups are synchronous; the
//! configured latency is applied by the HTTP handlers.

use schoolcart::{EntityId, EquipmentItem, EquipmentList, NamedRef};
use std::collections::HashMap;
use tracing::debug;

const UNKNOWN_CLASS: &str = "Unknown Class";

#[derive(Debug, Clone)]
pub struct MockCatalog {
  schools: Vec<NamedRef>,
  grades: HashMap<EntityId, Vec<NamedRef>>,
  classes: HashMap<EntityId, Vec<NamedRef>>,
  equipment: HashMap<EntityId, EquipmentList>,
}

fn item(id: u64, name: &str, quantity: u32, required: bool) -> EquipmentItem {
  EquipmentItem {
    id: id.into(),
    name: name.to_string(),
    quantity,
    required,
  }
}

/// The first-grade list shared by both Begin classes; only the optional last item differs.
fn first_grade_list(class_id: u64, class_name: &str, optional: EquipmentItem) -> EquipmentList {
  EquipmentList {
    class_id: class_id.into(),
    class_name: class_name.to_string(),
    items: vec![
      item(1, "Pencils (pack of 12)", 1, true),
      item(2, "Erasers", 2, true),
      item(3, "Colored Pencils (24 colors)", 1, true),
      item(4, "Notebooks (5 pack)", 1, true),
      item(5, "Glue Stick", 2, true),
      optional,
    ],
  }
}

impl MockCatalog {
  pub fn new() -> Self {
    let schools = vec![NamedRef::new(1u64, "Begin"), NamedRef::new(2u64, "Ben-Gurion")];

    let grade_names = ["כיתה א", "כיתה ב", "כיתה ג"];
    let mut grades = HashMap::new();
    for (school, first_grade) in [(1u64, 10u64), (2, 20)] {
      let list = grade_names
        .iter()
        .enumerate()
        .map(|(offset, name)| NamedRef::new(first_grade + offset as u64, *name))
        .collect();
      grades.insert(EntityId::from(school), list);
    }

    // Grade g has classes g*10+1 and g*10+2.
    let mut classes = HashMap::new();
    for grade in [10u64, 11, 12, 20, 21, 22] {
      let (first, second) = if grade < 20 { ("Class 1", "Class 2") } else { ("Class A", "Class B") };
      classes.insert(
        EntityId::from(grade),
        vec![NamedRef::new(grade * 10 + 1, first), NamedRef::new(grade * 10 + 2, second)],
      );
    }

    let mut equipment = HashMap::new();
    equipment.insert(
      EntityId::from(101u64),
      first_grade_list(101, "Begin כיתה א - Class 1", item(6, "Scissors", 1, false)),
    );
    equipment.insert(
      EntityId::from(102u64),
      first_grade_list(102, "Begin כיתה א - Class 2", item(7, "Markers Set", 1, false)),
    );

    Self {
      schools,
      grades,
      classes,
      equipment,
    }
  }

  pub fn schools(&self) -> Vec<NamedRef> {
    self.schools.clone()
  }

  /// Unknown schools have no grades.
  pub fn grades(&self, school_id: &EntityId) -> Vec<NamedRef> {
    self.grades.get(school_id).cloned().unwrap_or_default()
  }

  pub fn classes(&self, grade_id: &EntityId) -> Vec<NamedRef> {
    self.classes.get(grade_id).cloned().unwrap_or_default()
  }

  /// Classes without a curated list get a generic one-item list.
  pub fn equipment(&self, class_id: &EntityId) -> EquipmentList {
    match self.equipment.get(class_id) {
      Some(list) => list.clone(),
      None => {
        debug!(class_id = %class_id, "No curated list, serving generic supplies.");
        EquipmentList {
          class_id: class_id.clone(),
          class_name: UNKNOWN_CLASS.to_string(),
          items: vec![item(1, "Standard School Supplies", 1, true)],
        }
      }
    }
  }
}

impl Default for MockCatalog {
  fn default() -> Self {
    Self::new()
  }
}
