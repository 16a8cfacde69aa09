// core/src/select.rs

//! Filterable single-choice list used for the school, grade and class pickers.

use crate::model::{EntityId, NamedRef};

pub const DEFAULT_PLACEHOLDER: &str = "Search...";

#[derive(Debug, Clone)]
pub struct SearchableSelect {
  label: String,
  items: Vec<NamedRef>,
  query: String,
  selected: Option<NamedRef>,
  open: bool,
  disabled: bool,
}

impl SearchableSelect {
  pub fn new(label: impl Into<String>, items: Vec<NamedRef>) -> Self {
    Self {
      label: label.into(),
      items,
      query: String::new(),
      selected: None,
      open: false,
      disabled: false,
    }
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn items(&self) -> &[NamedRef] {
    &self.items
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn selected(&self) -> Option<&NamedRef> {
    self.selected.as_ref()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Replacing the options (a parent choice changed) clears query and choice.
  pub fn set_items(&mut self, items: Vec<NamedRef>) {
    self.items = items;
    self.query.clear();
    self.selected = None;
  }

  pub fn clear(&mut self) {
    self.set_items(Vec::new());
    self.open = false;
  }

  pub fn set_disabled(&mut self, disabled: bool) {
    self.disabled = disabled;
    if disabled {
      self.open = false;
    }
  }

  /// Typing opens the list.
  pub fn set_query(&mut self, query: impl Into<String>) {
    self.query = query.into();
    self.open = !self.disabled;
  }

  pub fn focus(&mut self) {
    self.open = !self.disabled;
  }

  pub fn blur(&mut self) {
    self.open = false;
  }

  /// The dropdown is shown only while open, enabled and non-empty.
  pub fn is_open(&self) -> bool {
    self.open && !self.disabled && !self.filtered().is_empty()
  }

  pub fn placeholder(&self) -> &str {
    self
      .selected
      .as_ref()
      .map(|item| item.name.as_str())
      .unwrap_or(DEFAULT_PLACEHOLDER)
  }

  /// Case-insensitive substring match on the option name.
  pub fn filtered(&self) -> Vec<&NamedRef> {
    let needle = self.query.to_lowercase();
    self
      .items
      .iter()
      .filter(|item| item.name.to_lowercase().contains(&needle))
      .collect()
  }

  /// Chooses the option with `id`; the query becomes its name and the list closes.
  pub fn select(&mut self, id: &EntityId) -> Option<NamedRef> {
    if self.disabled {
      return None;
    }
    let item = self.items.iter().find(|item| &item.id == id)?.clone();
    self.query = item.name.clone();
    self.selected = Some(item.clone());
    self.open = false;
    Some(item)
  }
}
