// core/src/presenter.rs

//! Per-class equipment list with a checkbox and a quantity control per item.

use std::collections::{HashMap, HashSet};

use crate::model::{CartItem, EntityId, EquipmentList, MAX_QUANTITY, MIN_QUANTITY};

/// Clamps a requested quantity into `[MIN_QUANTITY, MAX_QUANTITY]`.
pub fn clamp_quantity(requested: i64) -> u32 {
  requested.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u32
}

/// Reads a quantity field the way a number input does: leading whitespace and
/// one sign are accepted, digits are read up to the first non-digit, and
/// anything unreadable counts as 0. The result is clamped.
pub fn parse_quantity_input(raw: &str) -> u32 {
  let trimmed = raw.trim_start();
  let (negative, digits) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    _ => (false, trimmed),
  };
  let digits: &str = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
  if digits.is_empty() {
    return MIN_QUANTITY;
  }
  // Saturate instead of overflowing; anything this large clamps anyway.
  let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
  clamp_quantity(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRow {
  pub id: EntityId,
  pub name: String,
  pub required: bool,
  pub selected: bool,
  pub quantity: u32,
  /// The quantity control is disabled for unselected items.
  pub quantity_editable: bool,
}

#[derive(Debug, Clone)]
pub struct EquipmentPresenter {
  list: EquipmentList,
  selected: HashSet<EntityId>,
  quantities: HashMap<EntityId, u32>,
}

impl EquipmentPresenter {
  /// Every item starts selected at its listed quantity.
  pub fn new(list: EquipmentList) -> Self {
    let selected = list.items.iter().map(|item| item.id.clone()).collect();
    Self {
      list,
      selected,
      quantities: HashMap::new(),
    }
  }

  pub fn class_name(&self) -> &str {
    &self.list.class_name
  }

  pub fn list(&self) -> &EquipmentList {
    &self.list
  }

  pub fn is_selected(&self, id: &EntityId) -> bool {
    self.selected.contains(id)
  }

  /// Chosen quantity, or the listed one if the user has not changed it.
  pub fn quantity(&self, id: &EntityId) -> Option<u32> {
    let item = self.list.items.iter().find(|item| &item.id == id)?;
    Some(self.quantities.get(id).copied().unwrap_or(item.quantity))
  }

  pub fn rows(&self) -> Vec<EquipmentRow> {
    self
      .list
      .items
      .iter()
      .map(|item| {
        let selected = self.selected.contains(&item.id);
        EquipmentRow {
          id: item.id.clone(),
          name: item.name.clone(),
          required: item.required,
          selected,
          quantity: self.quantities.get(&item.id).copied().unwrap_or(item.quantity),
          quantity_editable: selected,
        }
      })
      .collect()
  }

  /// Flips the checkbox; returns the new state, or `None` for an unknown id.
  pub fn toggle(&mut self, id: &EntityId) -> Option<bool> {
    if !self.list.items.iter().any(|item| &item.id == id) {
      return None;
    }
    if self.selected.remove(id) {
      Some(false)
    } else {
      self.selected.insert(id.clone());
      Some(true)
    }
  }

  /// Sets a clamped quantity for a selected item. Returns the stored value, or
  /// `None` when the item is unknown or its control is disabled.
  pub fn set_quantity(&mut self, id: &EntityId, requested: i64) -> Option<u32> {
    if !self.selected.contains(id) {
      return None;
    }
    let quantity = clamp_quantity(requested);
    self.quantities.insert(id.clone(), quantity);
    Some(quantity)
  }

  pub fn set_quantity_input(&mut self, id: &EntityId, raw: &str) -> Option<u32> {
    self.set_quantity(id, i64::from(parse_quantity_input(raw)))
  }

  pub fn selected_count(&self) -> usize {
    self.selected.len()
  }

  /// Selected items whose quantity is above zero.
  pub fn valid_item_count(&self) -> usize {
    self.payload_items().len()
  }

  /// Items to save, in list order: selected and with a positive quantity.
  pub fn payload_items(&self) -> Vec<CartItem> {
    self
      .list
      .items
      .iter()
      .filter(|item| self.selected.contains(&item.id))
      .map(|item| {
        let quantity = self.quantities.get(&item.id).copied().unwrap_or(item.quantity);
        CartItem::new(item.id.clone(), item.name.clone(), quantity)
      })
      .filter(|item| item.quantity > 0)
      .collect()
  }
}
