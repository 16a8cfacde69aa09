// core/src/model/cart.rs

//! Cart data carried between the page controller, the cart store and the backend.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::NamedRef;
use super::ids::EntityId;

/// Upper bound of the per-item quantity control.
pub const MAX_QUANTITY: u32 = 99;
pub const MIN_QUANTITY: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: EntityId,
  pub name: String,
  pub quantity: u32,
}

impl CartItem {
  pub fn new(id: impl Into<EntityId>, name: impl Into<String>, quantity: u32) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      quantity,
    }
  }
}

/// What the page controller submits when the user saves a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntryPayload {
  pub school: NamedRef,
  pub grade: NamedRef,
  pub class: NamedRef,
  pub items: Vec<CartItem>,
}

/// One saved equipment list.
///
/// Entries are never edited after creation; the location fields are only
/// reachable through accessors. The only mutation the cart supports is
/// removing a whole entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
  id: EntityId,
  timestamp: i64,
  school: NamedRef,
  grade: NamedRef,
  class: NamedRef,
  items: Vec<CartItem>,
}

impl CartEntry {
  /// Stamps a payload with a fresh id and the current time.
  pub fn from_payload(payload: CartEntryPayload) -> Self {
    Self::from_payload_at(payload, EntityId::generate(), Utc::now())
  }

  pub fn from_payload_at(payload: CartEntryPayload, id: EntityId, created_at: DateTime<Utc>) -> Self {
    let items = payload
      .items
      .into_iter()
      .filter(|item| item.quantity > 0)
      .collect();
    Self {
      id,
      timestamp: created_at.timestamp_millis(),
      school: payload.school,
      grade: payload.grade,
      class: payload.class,
      items,
    }
  }

  pub fn id(&self) -> &EntityId {
    &self.id
  }

  /// Creation time in epoch milliseconds.
  pub fn timestamp(&self) -> i64 {
    self.timestamp
  }

  pub fn school(&self) -> &NamedRef {
    &self.school
  }

  pub fn grade(&self) -> &NamedRef {
    &self.grade
  }

  pub fn class(&self) -> &NamedRef {
    &self.class
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  /// Sum of all item quantities in this entry.
  pub fn total_quantity(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity)).sum()
  }

  /// `"<school> - <grade> - <class>"`, used in confirmations and listings.
  pub fn label(&self) -> String {
    format!("{} - {} - {}", self.school.name, self.grade.name, self.class.name)
  }

  pub fn created_at(&self) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(self.timestamp).single()
  }

  /// e.g. `Oct 18, 2026, 09:05 AM`
  pub fn display_date(&self) -> String {
    self
      .created_at()
      .map(|at| at.format("%b %-d, %Y, %I:%M %p").to_string())
      .unwrap_or_default()
  }
}

/// Totals shown above the cart listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub entry_count: usize,
  pub total_items: u64,
}

impl CartSummary {
  pub fn of(entries: &[CartEntry]) -> Self {
    Self {
      entry_count: entries.len(),
      total_items: entries.iter().map(CartEntry::total_quantity).sum(),
    }
  }
}
