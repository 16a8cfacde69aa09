// server/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{CartRepository, MockCatalog, SessionRegistry, UserDirectory};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub catalog: Arc<MockCatalog>,
  pub users: Arc<UserDirectory>,
  pub sessions: Arc<SessionRegistry>,
  pub carts: Arc<CartRepository>,
}

impl AppState {
  /// Builds empty stores and seeds the demo account from `config`.
  pub fn new(config: AppConfig) -> Result<Self> {
    let users = UserDirectory::new();
    users.register(&config.demo_username, &config.demo_password)?;
    Ok(Self {
      config: Arc::new(config),
      catalog: Arc::new(MockCatalog::new()),
      users: Arc::new(users),
      sessions: Arc::new(SessionRegistry::new()),
      carts: Arc::new(CartRepository::new()),
    })
  }
}
