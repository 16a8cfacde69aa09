// tests/funnel_tests.rs
mod common;

use common::*;
use schoolcart::{CartStore, EntityId, SelectionFunnel, SessionHandle};
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn id(raw: u64) -> EntityId {
  EntityId::from(raw)
}

async fn funnel_at_class_101() -> SelectionFunnel<FakeCatalog> {
  let mut funnel = SelectionFunnel::new(FakeCatalog::default());
  funnel.load_schools().await;
  assert!(funnel.select_school(&id(1)).await);
  assert!(funnel.select_grade(&id(10)).await);
  assert!(funnel.select_class(&id(101)).await);
  funnel
}

#[tokio::test]
#[serial]
async fn each_level_loads_the_next() {
  setup_tracing();
  let mut funnel = SelectionFunnel::new(FakeCatalog::default());
  funnel.load_schools().await;
  assert_eq!(funnel.schools().items().len(), 2);
  assert!(funnel.grades().is_empty());

  funnel.select_school(&id(1)).await;
  assert_eq!(funnel.school().unwrap().name, "Begin");
  assert_eq!(funnel.grades().items().len(), 3);

  funnel.select_grade(&id(10)).await;
  let class_ids: Vec<&str> = funnel.classes().items().iter().map(|c| c.id.as_str()).collect();
  assert_eq!(class_ids, vec!["101", "102"]);

  funnel.select_class(&id(101)).await;
  let presenter = funnel.equipment().unwrap();
  assert_eq!(presenter.rows().len(), 6);
  assert!(!funnel.is_loading());
}

#[tokio::test]
#[serial]
async fn selecting_a_school_resets_everything_below() {
  setup_tracing();
  let mut funnel = funnel_at_class_101().await;

  funnel.select_school(&id(2)).await;

  assert_eq!(funnel.school().unwrap().id, "2");
  assert!(funnel.grade().is_none());
  assert!(funnel.class().is_none());
  assert!(funnel.classes().is_empty());
  assert!(funnel.equipment().is_none());
  assert_eq!(funnel.grades().items()[0].id, "20");
  assert!(funnel.grades().selected().is_none());
}

#[tokio::test]
#[serial]
async fn selecting_a_grade_keeps_the_school() {
  setup_tracing();
  let mut funnel = funnel_at_class_101().await;

  funnel.select_grade(&id(11)).await;

  assert_eq!(funnel.school().unwrap().id, "1");
  assert_eq!(funnel.grade().unwrap().id, "11");
  assert!(funnel.class().is_none());
  assert!(funnel.equipment().is_none());
  assert_eq!(funnel.classes().items()[0].id, "111");
}

#[tokio::test]
#[serial]
async fn unknown_choice_is_ignored() {
  setup_tracing();
  let mut funnel = funnel_at_class_101().await;
  assert!(!funnel.select_grade(&id(99)).await);
  assert_eq!(funnel.grade().unwrap().id, "10");
  assert!(funnel.equipment().is_some());
}

#[tokio::test]
#[serial]
async fn deselected_item_is_left_out_of_the_saved_entry() {
  setup_tracing();
  let backend = FakeBackend::new();
  let store = CartStore::new(backend.clone(), SessionHandle::for_user(demo_user()));
  let mut funnel = funnel_at_class_101().await;

  assert_eq!(funnel.toggle_item(&id(6)), Some(false));
  let (entry, outcome) = funnel.save_to_cart(&store).await.unwrap().unwrap();

  assert!(outcome.is_persisted());
  assert_eq!(entry.items().len(), 5);
  assert!(entry.items().iter().all(|item| item.id != "6"));
  assert_eq!(entry.class().id, "101");
  assert_eq!(store.entries(), vec![entry]);
}

#[tokio::test]
#[serial]
async fn quantity_edits_are_clamped_and_saved() {
  setup_tracing();
  let backend = FakeBackend::new();
  let store = CartStore::new(backend.clone(), SessionHandle::for_user(demo_user()));
  let mut funnel = funnel_at_class_101().await;

  assert_eq!(funnel.set_quantity_input(&id(1), "150"), Some(99));
  assert_eq!(funnel.set_quantity(&id(2), -5), Some(0));
  let (entry, _) = funnel.save_to_cart(&store).await.unwrap().unwrap();

  assert_eq!(entry.items()[0].quantity, 99);
  assert!(entry.items().iter().all(|item| item.id != "2"));
}

#[tokio::test]
#[serial]
async fn nothing_to_save_without_a_complete_selection() {
  setup_tracing();
  let store = CartStore::new(FakeBackend::new(), SessionHandle::for_user(demo_user()));
  let mut funnel = SelectionFunnel::new(FakeCatalog::default());
  funnel.load_schools().await;
  funnel.select_school(&id(1)).await;

  assert!(funnel.build_payload().is_none());
  assert!(!funnel.can_save());
  assert!(funnel.save_to_cart(&store).await.unwrap().is_none());

  let mut funnel = funnel_at_class_101().await;
  for item in 1..=6 {
    funnel.toggle_item(&id(item));
  }
  assert!(funnel.build_payload().is_none());
}

#[tokio::test]
#[serial]
async fn save_is_disabled_during_cooldown() {
  setup_tracing();
  let store = CartStore::new(FakeBackend::new(), SessionHandle::for_user(demo_user()));
  let mut funnel = funnel_at_class_101().await.with_save_cooldown(Duration::from_millis(50));

  assert!(funnel.can_save());
  assert!(funnel.save_to_cart(&store).await.unwrap().is_some());
  assert!(!funnel.can_save());
  assert!(funnel.save_to_cart(&store).await.unwrap().is_none());

  tokio::time::sleep(Duration::from_millis(80)).await;
  assert!(funnel.can_save());
  assert_eq!(store.entries().len(), 1);
}

#[tokio::test]
#[serial]
async fn failed_equipment_fetch_is_recorded() {
  setup_tracing();
  let catalog = FakeCatalog::default();
  catalog.fail_equipment.store(true, Ordering::SeqCst);
  let mut funnel = SelectionFunnel::new(catalog);
  funnel.load_schools().await;
  funnel.select_school(&id(1)).await;
  funnel.select_grade(&id(10)).await;
  funnel.select_class(&id(101)).await;

  assert!(funnel.equipment().is_none());
  assert_eq!(funnel.last_error(), Some("Failed to fetch equipment"));
  assert!(!funnel.is_loading());
}

#[tokio::test]
#[serial]
async fn unknown_class_gets_the_generic_list() {
  setup_tracing();
  let mut funnel = SelectionFunnel::new(FakeCatalog::default());
  funnel.load_schools().await;
  funnel.select_school(&id(1)).await;
  funnel.select_grade(&id(10)).await;
  funnel.select_class(&id(102)).await;

  let presenter = funnel.equipment().unwrap();
  assert_eq!(presenter.class_name(), "Unknown Class");
  assert_eq!(presenter.rows().len(), 1);
}
