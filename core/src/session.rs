// core/src/session.rs

//! Authentication state with an explicit lifecycle.
//!
//! The session is restored once at startup from [`SessionStorage`], moves to
//! `Authenticated` on login and back to `Anonymous` on logout. Work that
//! follows the user is registered as hooks: [`Session::on_login`] (typically
//! the cart store's `refresh_cart`) and [`Session::on_logout`] (its `reset`).
//!
//! Components that only need to know *who* is logged in hold a cheap
//! [`SessionHandle`] instead of the session itself.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::CartBackend;
use crate::error::GatewayError;
use crate::model::{AuthUser, Credentials, EntityId};
use crate::store::SharedState;

const AUTH_FLAG_KEY: &str = "isAuthenticated";
const USERID_KEY: &str = "userid";
const USERNAME_KEY: &str = "username";

/// Session-scoped key/value storage that survives a page reload but not the
/// end of the browsing session.
pub trait SessionStorage: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str);
  fn remove(&self, key: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStorage {
  values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SessionStorage for MemorySessionStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    self.values.lock().insert(key.to_string(), value.to_string());
  }

  fn remove(&self, key: &str) {
    self.values.lock().remove(key);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
  #[default]
  Anonymous,
  Authenticated(AuthUser),
}

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Username and password are required")]
  MissingCredentials,

  #[error(transparent)]
  Gateway(#[from] GatewayError),
}

/// Read-only view of the session state.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(SharedState<SessionState>);

impl SessionHandle {
  pub fn anonymous() -> Self {
    Self::default()
  }

  /// A handle that is already logged in; used where no `Session` drives the state.
  pub fn for_user(user: AuthUser) -> Self {
    SessionHandle(SharedState::new(SessionState::Authenticated(user)))
  }

  pub fn state(&self) -> SessionState {
    self.0.read().clone()
  }

  pub fn userid(&self) -> Option<EntityId> {
    match &*self.0.read() {
      SessionState::Authenticated(user) => Some(user.userid.clone()),
      SessionState::Anonymous => None,
    }
  }

  pub fn is_authenticated(&self) -> bool {
    self.userid().is_some()
  }
}

type LoginHook = Box<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;
type LogoutHook = Box<dyn Fn() + Send + Sync>;

pub struct Session<B: CartBackend, S: SessionStorage> {
  backend: Arc<B>,
  storage: S,
  handle: SessionHandle,
  login_hooks: Vec<LoginHook>,
  logout_hooks: Vec<LogoutHook>,
}

impl<B: CartBackend, S: SessionStorage> Session<B, S> {
  /// Initializes the session from persisted storage.
  ///
  /// A stored flag alone is not trusted: the backend is asked who the session
  /// belongs to, and a failing check clears the persisted state.
  #[instrument(name = "session::restore", skip_all)]
  pub async fn restore(backend: Arc<B>, storage: S) -> Self {
    let session = Self {
      backend,
      storage,
      handle: SessionHandle::anonymous(),
      login_hooks: Vec::new(),
      logout_hooks: Vec::new(),
    };

    if session.storage.get(AUTH_FLAG_KEY).as_deref() != Some("true") {
      return session;
    }

    match session.backend.check_auth().await {
      Ok(user) => {
        info!(userid = %user.userid, "Restored authenticated session.");
        session.persist(&user);
        session.set_state(SessionState::Authenticated(user));
      }
      Err(e) => {
        warn!(error = %e, "Stored session is no longer valid; starting anonymous.");
        session.clear_persisted();
      }
    }
    session
  }

  pub fn handle(&self) -> SessionHandle {
    self.handle.clone()
  }

  pub fn state(&self) -> SessionState {
    self.handle.state()
  }

  pub fn userid(&self) -> Option<EntityId> {
    self.handle.userid()
  }

  pub fn is_authenticated(&self) -> bool {
    self.handle.is_authenticated()
  }

  /// Registers work awaited after every successful login, in registration order.
  ///
  /// Hooks exist only once the session does, so a session that `restore`
  /// brought back as authenticated has not run them: callers load the
  /// user's data themselves after restoring.
  pub fn on_login<F, Fut>(&mut self, hook: F)
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    self.login_hooks.push(Box::new(move || Box::pin(hook())));
  }

  /// Registers teardown work run on every logout.
  pub fn on_logout(&mut self, hook: impl Fn() + Send + Sync + 'static) {
    self.logout_hooks.push(Box::new(hook));
  }

  #[instrument(name = "session::login", skip(self, password), err(Display))]
  pub async fn login(&self, username: &str, password: &str) -> Result<AuthUser, SessionError> {
    let credentials = Credentials::new(username.trim(), password);
    if !credentials.is_complete() {
      return Err(SessionError::MissingCredentials);
    }
    let user = self.backend.login(&credentials).await?;
    info!(userid = %user.userid, "Logged in.");
    self.persist(&user);
    self.set_state(SessionState::Authenticated(user.clone()));
    for hook in &self.login_hooks {
      hook().await;
    }
    Ok(user)
  }

  /// Ends the session. Local state is torn down even if the backend call fails;
  /// that failure is returned after the teardown.
  #[instrument(name = "session::logout", skip(self), err(Display))]
  pub async fn logout(&self) -> Result<(), SessionError> {
    let remote = self.backend.logout().await;
    if let Err(e) = &remote {
      warn!(error = %e, "Backend logout failed; clearing local session anyway.");
    }
    self.clear_persisted();
    self.set_state(SessionState::Anonymous);
    for hook in &self.logout_hooks {
      hook();
    }
    info!("Logged out.");
    remote.map_err(SessionError::from)
  }

  fn set_state(&self, state: SessionState) {
    *self.handle.0.write() = state;
  }

  fn persist(&self, user: &AuthUser) {
    self.storage.set(AUTH_FLAG_KEY, "true");
    self.storage.set(USERID_KEY, user.userid.as_str());
    self.storage.set(USERNAME_KEY, &user.username);
  }

  fn clear_persisted(&self) {
    self.storage.remove(AUTH_FLAG_KEY);
    self.storage.remove(USERID_KEY);
    self.storage.remove(USERNAME_KEY);
  }
}
