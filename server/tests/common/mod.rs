// server/tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use once_cell::sync::Lazy;
use schoolcart::{CartEntry, CartEntryPayload, CartItem, NamedRef};
use schoolcart_server::services::SESSION_COOKIE;
use schoolcart_server::{AppConfig, AppState};
use tracing::Level;

pub const USERNAME: &str = "demo";
pub const PASSWORD: &str = "secret";

pub fn test_state() -> AppState {
  AppState::new(AppConfig::for_tests(USERNAME, PASSWORD)).expect("demo user should seed")
}

/// The session cookie set by a login response, detached from the response.
pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
  resp
    .response()
    .cookies()
    .find(|cookie| cookie.name() == SESSION_COOKIE)
    .map(|cookie| cookie.into_owned())
}

pub fn entry(id: &str) -> CartEntry {
  let payload = CartEntryPayload {
    school: NamedRef::new(1u64, "Begin"),
    grade: NamedRef::new(10u64, "כיתה א"),
    class: NamedRef::new(101u64, "Class 1"),
    items: vec![CartItem::new(1u64, "Pencils (pack of 12)", 1), CartItem::new(2u64, "Erasers", 2)],
  };
  CartEntry::from_payload_at(payload, id.into(), chrono::Utc::now())
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
