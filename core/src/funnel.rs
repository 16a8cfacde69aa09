// core/src/funnel.rs

//! Page controller for the school -> grade -> class -> equipment flow.

use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

use crate::api::{CartBackend, CatalogSource};
use crate::error::CartResult;
use crate::model::{CartEntry, CartEntryPayload, EntityId, NamedRef};
use crate::presenter::EquipmentPresenter;
use crate::select::SearchableSelect;
use crate::store::{CartStore, SyncOutcome};

/// How long the save action stays disabled after a save.
pub const SAVE_COOLDOWN: Duration = Duration::from_secs(3);

/// Holds the in-progress selection until it is committed to the cart.
///
/// Choosing a school clears every grade, class and equipment state; choosing a
/// grade clears class and equipment but keeps the school. Each operation takes
/// `&mut self`, so fetches issued through one funnel never overlap.
pub struct SelectionFunnel<C: CatalogSource> {
  catalog: C,
  schools: SearchableSelect,
  grades: SearchableSelect,
  classes: SearchableSelect,
  school: Option<NamedRef>,
  grade: Option<NamedRef>,
  class: Option<NamedRef>,
  equipment: Option<EquipmentPresenter>,
  loading: bool,
  last_error: Option<String>,
  save_cooldown: Duration,
  last_saved_at: Option<Instant>,
}

impl<C: CatalogSource> SelectionFunnel<C> {
  pub fn new(catalog: C) -> Self {
    Self {
      catalog,
      schools: SearchableSelect::new("School", Vec::new()),
      grades: SearchableSelect::new("Grade", Vec::new()),
      classes: SearchableSelect::new("Class", Vec::new()),
      school: None,
      grade: None,
      class: None,
      equipment: None,
      loading: false,
      last_error: None,
      save_cooldown: SAVE_COOLDOWN,
      last_saved_at: None,
    }
  }

  pub fn with_save_cooldown(mut self, cooldown: Duration) -> Self {
    self.save_cooldown = cooldown;
    self
  }

  pub fn schools(&self) -> &SearchableSelect {
    &self.schools
  }

  pub fn grades(&self) -> &SearchableSelect {
    &self.grades
  }

  pub fn classes(&self) -> &SearchableSelect {
    &self.classes
  }

  /// Mutable access for query/focus handling on the pickers.
  pub fn schools_mut(&mut self) -> &mut SearchableSelect {
    &mut self.schools
  }

  pub fn grades_mut(&mut self) -> &mut SearchableSelect {
    &mut self.grades
  }

  pub fn classes_mut(&mut self) -> &mut SearchableSelect {
    &mut self.classes
  }

  pub fn school(&self) -> Option<&NamedRef> {
    self.school.as_ref()
  }

  pub fn grade(&self) -> Option<&NamedRef> {
    self.grade.as_ref()
  }

  pub fn class(&self) -> Option<&NamedRef> {
    self.class.as_ref()
  }

  pub fn equipment(&self) -> Option<&EquipmentPresenter> {
    self.equipment.as_ref()
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  #[instrument(name = "funnel::load_schools", skip(self))]
  pub async fn load_schools(&mut self) {
    self.begin_fetch();
    let fetched = self.catalog.schools().await;
    if let Some(schools) = self.end_fetch(fetched) {
      self.schools.set_items(schools);
    }
  }

  /// Returns false if `id` is not among the offered schools.
  #[instrument(name = "funnel::select_school", skip(self), fields(school_id = %id))]
  pub async fn select_school(&mut self, id: &EntityId) -> bool {
    let Some(school) = self.schools.select(id) else {
      warn!("Unknown school selected.");
      return false;
    };
    info!(school = %school.name, "School selected.");
    self.school = Some(school.clone());
    self.grade = None;
    self.class = None;
    self.grades.clear();
    self.classes.clear();
    self.equipment = None;

    self.begin_fetch();
    let fetched = self.catalog.grades(&school.id).await;
    if let Some(grades) = self.end_fetch(fetched) {
      self.grades.set_items(grades);
    }
    true
  }

  #[instrument(name = "funnel::select_grade", skip(self), fields(grade_id = %id))]
  pub async fn select_grade(&mut self, id: &EntityId) -> bool {
    let Some(grade) = self.grades.select(id) else {
      warn!("Unknown grade selected.");
      return false;
    };
    info!(grade = %grade.name, "Grade selected.");
    self.grade = Some(grade.clone());
    self.class = None;
    self.classes.clear();
    self.equipment = None;

    self.begin_fetch();
    let fetched = self.catalog.classes(&grade.id).await;
    if let Some(classes) = self.end_fetch(fetched) {
      self.classes.set_items(classes);
    }
    true
  }

  #[instrument(name = "funnel::select_class", skip(self), fields(class_id = %id))]
  pub async fn select_class(&mut self, id: &EntityId) -> bool {
    let Some(class) = self.classes.select(id) else {
      warn!("Unknown class selected.");
      return false;
    };
    info!(class = %class.name, "Class selected.");
    self.class = Some(class.clone());
    self.equipment = None;

    self.begin_fetch();
    let fetched = self.catalog.equipment(&class.id).await;
    if let Some(list) = self.end_fetch(fetched) {
      self.equipment = Some(EquipmentPresenter::new(list));
    }
    true
  }

  pub fn toggle_item(&mut self, id: &EntityId) -> Option<bool> {
    self.equipment.as_mut()?.toggle(id)
  }

  pub fn set_quantity(&mut self, id: &EntityId, requested: i64) -> Option<u32> {
    self.equipment.as_mut()?.set_quantity(id, requested)
  }

  pub fn set_quantity_input(&mut self, id: &EntityId, raw: &str) -> Option<u32> {
    self.equipment.as_mut()?.set_quantity_input(id, raw)
  }

  /// The entry that saving would create, if the selection is complete and at
  /// least one item is selected with a positive quantity.
  pub fn build_payload(&self) -> Option<CartEntryPayload> {
    let (school, grade, class) = (self.school.as_ref()?, self.grade.as_ref()?, self.class.as_ref()?);
    let items = self.equipment.as_ref()?.payload_items();
    if items.is_empty() {
      return None;
    }
    Some(CartEntryPayload {
      school: school.clone(),
      grade: grade.clone(),
      class: class.clone(),
      items,
    })
  }

  pub fn cooling_down(&self) -> bool {
    self
      .last_saved_at
      .is_some_and(|at| at.elapsed() < self.save_cooldown)
  }

  pub fn can_save(&self) -> bool {
    !self.loading && !self.cooling_down() && self.build_payload().is_some()
  }

  /// Commits the current selection to the cart.
  ///
  /// Returns `Ok(None)` when saving is not possible right now (incomplete
  /// selection, nothing selected, or still cooling down from the last save).
  #[instrument(name = "funnel::save_to_cart", skip_all)]
  pub async fn save_to_cart<B: CartBackend>(
    &mut self,
    store: &CartStore<B>,
  ) -> CartResult<Option<(CartEntry, SyncOutcome)>> {
    if self.cooling_down() {
      return Ok(None);
    }
    let Some(payload) = self.build_payload() else {
      return Ok(None);
    };
    let saved = store.add_to_cart(payload).await?;
    self.last_saved_at = Some(Instant::now());
    Ok(Some(saved))
  }

  fn begin_fetch(&mut self) {
    self.loading = true;
    self.last_error = None;
  }

  fn end_fetch<T>(&mut self, fetched: crate::error::GatewayResult<T>) -> Option<T> {
    self.loading = false;
    match fetched {
      Ok(value) => Some(value),
      Err(e) => {
        error!(error = %e, "Catalog fetch failed.");
        self.last_error = Some(e.to_string());
        None
      }
    }
  }
}
