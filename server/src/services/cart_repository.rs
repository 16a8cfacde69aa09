// server/src/services/cart_repository.rs

//! Per-user cart storage.
//!
//! Every mutation returns the stored list after the change, so callers never
//! have to read back what they just wrote.

use crate::errors::AppError;
use parking_lot::RwLock;
use schoolcart::{CartEntry, EntityId, MAX_QUANTITY};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
pub struct CartRepository {
  carts: RwLock<HashMap<EntityId, Vec<CartEntry>>>,
}

/// Rejects entries the client could never have produced.
pub fn validate_entry(entry: &CartEntry) -> Result<(), AppError> {
  if entry.id().is_blank() {
    return Err(AppError::Validation("Cart entry id is required".to_string()));
  }
  if entry.items().is_empty() {
    return Err(AppError::Validation(format!("Cart entry {} has no items", entry.id())));
  }
  if let Some(item) = entry
    .items()
    .iter()
    .find(|item| item.quantity == 0 || item.quantity > MAX_QUANTITY)
  {
    return Err(AppError::Validation(format!(
      "Quantity for '{}' must be between 1 and {}",
      item.name, MAX_QUANTITY
    )));
  }
  Ok(())
}

impl CartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, userid: &EntityId) -> Vec<CartEntry> {
    self.carts.read().get(userid).cloned().unwrap_or_default()
  }

  /// Replaces the whole cart. An empty list clears it.
  #[instrument(name = "carts::replace", skip(self, entries), fields(userid = %userid, count = entries.len()), err(Display))]
  pub fn replace(&self, userid: &EntityId, entries: Vec<CartEntry>) -> Result<Vec<CartEntry>, AppError> {
    let mut seen = HashSet::new();
    for entry in &entries {
      validate_entry(entry)?;
      if !seen.insert(entry.id().clone()) {
        return Err(AppError::Validation(format!("Duplicate cart entry id {}", entry.id())));
      }
    }
    let mut carts = self.carts.write();
    if entries.is_empty() {
      carts.remove(userid);
    } else {
      carts.insert(userid.clone(), entries.clone());
    }
    Ok(entries)
  }

  /// Appends a new entry or replaces the one with the same id in place.
  #[instrument(name = "carts::upsert", skip(self, entry), fields(userid = %userid, entry_id = %entry.id()), err(Display))]
  pub fn upsert(&self, userid: &EntityId, entry: CartEntry) -> Result<Vec<CartEntry>, AppError> {
    validate_entry(&entry)?;
    let mut carts = self.carts.write();
    let cart = carts.entry(userid.clone()).or_default();
    match cart.iter_mut().find(|existing| existing.id() == entry.id()) {
      Some(existing) => {
        debug!("Replacing existing entry.");
        *existing = entry;
      }
      None => cart.push(entry),
    }
    Ok(cart.clone())
  }

  /// Removes one entry. Unknown ids leave the cart unchanged.
  #[instrument(name = "carts::delete", skip(self), fields(userid = %userid, entry_id = %entry_id))]
  pub fn delete(&self, userid: &EntityId, entry_id: &EntityId) -> Vec<CartEntry> {
    let mut carts = self.carts.write();
    let Some(cart) = carts.get_mut(userid) else {
      return Vec::new();
    };
    let before = cart.len();
    cart.retain(|entry| entry.id() != entry_id);
    if cart.len() == before {
      debug!("Entry not in cart.");
    }
    cart.clone()
  }
}
