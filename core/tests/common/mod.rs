// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use schoolcart::{
  AuthUser, CartBackend, CartEntry, CartEntryPayload, CartItem, CatalogSource, Credentials, EntityId,
  EquipmentItem, EquipmentList, GatewayError, GatewayResult, NamedRef,
};
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tokio::sync::Notify;
use tracing::Level;

pub const USERNAME: &str = "demo";
pub const PASSWORD: &str = "secret";
pub const USERID: &str = "user-1";

pub fn demo_user() -> AuthUser {
  AuthUser {
    userid: USERID.into(),
    username: USERNAME.to_string(),
  }
}

// --- In-memory backend ---

/// Stands in for the cart/auth backend. Writes can be made to fail or to
/// wait on `write_gate` so tests can observe optimistic state.
#[derive(Default)]
pub struct FakeBackend {
  carts: Mutex<HashMap<EntityId, Vec<CartEntry>>>,
  logged_in: AtomicBool,
  pub fail_writes: AtomicBool,
  pub fail_reads: AtomicBool,
  pub fail_logout: AtomicBool,
  pub gate_writes: AtomicBool,
  pub write_gate: Notify,
  pub get_calls: AtomicUsize,
  pub write_calls: AtomicUsize,
  pub check_calls: AtomicUsize,
}

impl FakeBackend {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn logged_in() -> Arc<Self> {
    let backend = Self::default();
    backend.logged_in.store(true, Ordering::SeqCst);
    Arc::new(backend)
  }

  pub fn stored(&self, userid: &str) -> Vec<CartEntry> {
    self.carts.lock().get(&EntityId::from(userid)).cloned().unwrap_or_default()
  }

  pub fn seed(&self, userid: &str, entries: Vec<CartEntry>) {
    self.carts.lock().insert(userid.into(), entries);
  }

  pub fn is_logged_in(&self) -> bool {
    self.logged_in.load(Ordering::SeqCst)
  }

  async fn before_write(&self) -> GatewayResult<()> {
    self.write_calls.fetch_add(1, Ordering::SeqCst);
    if self.gate_writes.load(Ordering::SeqCst) {
      self.write_gate.notified().await;
    }
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(GatewayError::api(500, "Failed to update cart"));
    }
    Ok(())
  }
}

#[async_trait]
impl CartBackend for FakeBackend {
  async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthUser> {
    if credentials.username == USERNAME && credentials.password == PASSWORD {
      self.logged_in.store(true, Ordering::SeqCst);
      Ok(demo_user())
    } else {
      Err(GatewayError::api(401, "Invalid username or password"))
    }
  }

  async fn logout(&self) -> GatewayResult<()> {
    self.logged_in.store(false, Ordering::SeqCst);
    if self.fail_logout.load(Ordering::SeqCst) {
      return Err(GatewayError::api(500, "Logout failed"));
    }
    Ok(())
  }

  async fn check_auth(&self) -> GatewayResult<AuthUser> {
    self.check_calls.fetch_add(1, Ordering::SeqCst);
    if self.is_logged_in() {
      Ok(demo_user())
    } else {
      Err(GatewayError::api(401, "Not authenticated"))
    }
  }

  async fn get_cart(&self, userid: &EntityId) -> GatewayResult<Vec<CartEntry>> {
    self.get_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(GatewayError::api(500, "Failed to fetch cart"));
    }
    Ok(self.carts.lock().get(userid).cloned().unwrap_or_default())
  }

  async fn update_cart(&self, userid: &EntityId, entries: &[CartEntry]) -> GatewayResult<Vec<CartEntry>> {
    self.before_write().await?;
    let mut carts = self.carts.lock();
    carts.insert(userid.clone(), entries.to_vec());
    Ok(entries.to_vec())
  }

  async fn upsert_entry(&self, userid: &EntityId, entry: &CartEntry) -> GatewayResult<Vec<CartEntry>> {
    self.before_write().await?;
    let mut carts = self.carts.lock();
    let cart = carts.entry(userid.clone()).or_default();
    match cart.iter_mut().find(|e| e.id() == entry.id()) {
      Some(existing) => *existing = entry.clone(),
      None => cart.push(entry.clone()),
    }
    Ok(cart.clone())
  }

  async fn delete_entry(&self, userid: &EntityId, entry_id: &EntityId) -> GatewayResult<Vec<CartEntry>> {
    self.before_write().await?;
    let mut carts = self.carts.lock();
    let cart = carts.entry(userid.clone()).or_default();
    cart.retain(|e| e.id() != entry_id);
    Ok(cart.clone())
  }
}

// --- In-memory catalog (same tables the server serves) ---

#[derive(Default)]
pub struct FakeCatalog {
  pub fail_equipment: AtomicBool,
}

fn refs(pairs: &[(u64, &str)]) -> Vec<NamedRef> {
  pairs.iter().map(|(id, name)| NamedRef::new(*id, *name)).collect()
}

fn item(id: u64, name: &str, quantity: u32, required: bool) -> EquipmentItem {
  EquipmentItem {
    id: id.into(),
    name: name.to_string(),
    quantity,
    required,
  }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
  async fn schools(&self) -> GatewayResult<Vec<NamedRef>> {
    Ok(refs(&[(1, "Begin"), (2, "Ben-Gurion")]))
  }

  async fn grades(&self, school_id: &EntityId) -> GatewayResult<Vec<NamedRef>> {
    Ok(match school_id.as_str() {
      "1" => refs(&[(10, "Grade 1"), (11, "Grade 2"), (12, "Grade 3")]),
      "2" => refs(&[(20, "Grade 1"), (21, "Grade 2"), (22, "Grade 3")]),
      _ => Vec::new(),
    })
  }

  async fn classes(&self, grade_id: &EntityId) -> GatewayResult<Vec<NamedRef>> {
    Ok(match grade_id.as_str() {
      "10" => refs(&[(101, "Class 1"), (102, "Class 2")]),
      "11" => refs(&[(111, "Class 1"), (112, "Class 2")]),
      _ => Vec::new(),
    })
  }

  async fn equipment(&self, class_id: &EntityId) -> GatewayResult<EquipmentList> {
    if self.fail_equipment.load(Ordering::SeqCst) {
      return Err(GatewayError::api(500, "Failed to fetch equipment"));
    }
    Ok(match class_id.as_str() {
      "101" => EquipmentList {
        class_id: 101u64.into(),
        class_name: "Begin Grade 1 - Class 1".to_string(),
        items: vec![
          item(1, "Pencils (pack of 12)", 1, true),
          item(2, "Erasers", 2, true),
          item(3, "Colored Pencils (24 colors)", 1, true),
          item(4, "Notebooks (5 pack)", 1, true),
          item(5, "Glue Stick", 2, true),
          item(6, "Scissors", 1, false),
        ],
      },
      other => EquipmentList {
        class_id: other.into(),
        class_name: "Unknown Class".to_string(),
        items: vec![item(1, "Standard School Supplies", 1, true)],
      },
    })
  }
}

// --- Payload helpers ---

pub fn payload(items: Vec<CartItem>) -> CartEntryPayload {
  CartEntryPayload {
    school: NamedRef::new(1u64, "Begin"),
    grade: NamedRef::new(10u64, "Grade 1"),
    class: NamedRef::new(101u64, "Class 1"),
    items,
  }
}

pub fn simple_payload() -> CartEntryPayload {
  payload(vec![CartItem::new(1u64, "Pencils (pack of 12)", 1), CartItem::new(2u64, "Erasers", 2)])
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
