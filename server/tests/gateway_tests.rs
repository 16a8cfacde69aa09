// server/tests/gateway_tests.rs
//
// Drives the client library against a live server bound to an ephemeral port.
mod common;

use common::*;
use schoolcart::{
  CartBackend, CartStore, ClientConfig, EntityId, GatewayError, HttpGateway, MemorySessionStorage, SelectionFunnel,
  Session, SessionState, SessionStorage,
};
use schoolcart_server::run;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

fn spawn_server() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
  let address = listener.local_addr().expect("local address");
  let server = run(listener, test_state()).expect("start server");
  tokio::spawn(server);
  format!("http://{}", address)
}

fn gateway(base_url: &str) -> Arc<HttpGateway> {
  Arc::new(HttpGateway::new(&ClientConfig::new(base_url)).expect("gateway"))
}

fn id(raw: u64) -> EntityId {
  EntityId::from(raw)
}

#[tokio::test]
async fn select_save_remove_and_logout() {
  setup_tracing();
  let base_url = spawn_server();
  let backend = gateway(&base_url);
  let storage = MemorySessionStorage::new();

  let mut session = Session::restore(backend.clone(), storage.clone()).await;
  assert_eq!(session.state(), SessionState::Anonymous);
  let store = CartStore::new(backend.clone(), session.handle());
  session.on_login({
    let store = store.clone();
    move || {
      let store = store.clone();
      async move { store.refresh_cart().await }
    }
  });
  session.on_logout({
    let store = store.clone();
    move || store.reset()
  });

  let user = session.login(USERNAME, PASSWORD).await.unwrap();
  assert_eq!(storage.get("userid").as_deref(), Some(user.userid.as_str()));
  assert!(store.entries().is_empty());
  assert!(store.error().is_none());

  let mut funnel = SelectionFunnel::new(backend.catalog()).with_save_cooldown(Duration::ZERO);
  funnel.load_schools().await;
  assert!(funnel.select_school(&id(1)).await);
  assert!(funnel.select_grade(&id(10)).await);
  assert!(funnel.select_class(&id(101)).await);
  assert_eq!(funnel.equipment().map(|e| e.rows().len()), Some(6));

  assert_eq!(funnel.toggle_item(&id(6)), Some(false));
  let (saved, outcome) = funnel.save_to_cart(&store).await.unwrap().unwrap();
  assert!(outcome.is_persisted());
  assert_eq!(saved.items().len(), 5);

  let (second, _) = funnel.save_to_cart(&store).await.unwrap().unwrap();
  store.refresh_cart().await;
  let entries = store.entries();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].id(), saved.id());
  assert_eq!(entries[0].class().id, "101");
  assert!(entries[0].items().iter().all(|item| item.id != "6"));

  store.remove_from_cart(saved.id()).await.unwrap();
  store.refresh_cart().await;
  let ids: Vec<EntityId> = store.entries().iter().map(|e| e.id().clone()).collect();
  assert_eq!(ids, vec![second.id().clone()]);

  store.clear_cart().await.unwrap();
  store.refresh_cart().await;
  assert!(store.entries().is_empty());
  assert!(store.error().is_none());

  session.logout().await.unwrap();
  assert!(!session.is_authenticated());
  assert!(matches!(
    backend.check_auth().await,
    Err(GatewayError::Api { status: 401, .. })
  ));
}

#[tokio::test]
async fn restore_confirms_a_live_session() {
  setup_tracing();
  let base_url = spawn_server();
  let backend = gateway(&base_url);
  let storage = MemorySessionStorage::new();

  let session = Session::restore(backend.clone(), storage.clone()).await;
  let user = session.login(USERNAME, PASSWORD).await.unwrap();

  // Same cookie jar, fresh in-memory state.
  let restored = Session::restore(backend.clone(), storage.clone()).await;
  assert_eq!(restored.userid(), Some(user.userid));

  // A client without the cookie is turned away and its stale flag dropped.
  let stranger = Session::restore(gateway(&base_url), storage.clone()).await;
  assert!(!stranger.is_authenticated());
  assert_eq!(storage.get("isAuthenticated"), None);
}

#[tokio::test]
async fn server_messages_reach_the_client() {
  setup_tracing();
  let base_url = spawn_server();
  let backend = gateway(&base_url);

  let session = Session::restore(backend.clone(), MemorySessionStorage::new()).await;
  let err = session.login(USERNAME, "wrong").await.unwrap_err();
  assert_eq!(err.to_string(), "Invalid username or password");

  let err = backend.get_cart(&EntityId::from("anyone")).await.unwrap_err();
  assert_eq!(err.status(), Some(401));
  assert_eq!(err.to_string(), "Not authenticated");
}
