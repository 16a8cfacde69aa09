// server/src/services/session_registry.rs

//! Cookie-token sessions.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use schoolcart::AuthUser;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "schoolcart_session";

#[derive(Debug, Clone)]
struct SessionRecord {
  user: AuthUser,
  opened_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
  sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts a session for `user` and returns its token.
  pub fn open(&self, user: AuthUser) -> String {
    let token = Uuid::new_v4().to_string();
    info!(userid = %user.userid, "Opened session.");
    self.sessions.write().insert(
      token.clone(),
      SessionRecord {
        user,
        opened_at: Utc::now(),
      },
    );
    token
  }

  pub fn resolve(&self, token: &str) -> Option<AuthUser> {
    let sessions = self.sessions.read();
    let record = sessions.get(token)?;
    debug!(userid = %record.user.userid, opened_at = %record.opened_at, "Resolved session.");
    Some(record.user.clone())
  }

  /// Ends the session. Returns false if the token was unknown.
  pub fn close(&self, token: &str) -> bool {
    match self.sessions.write().remove(token) {
      Some(record) => {
        info!(userid = %record.user.userid, "Closed session.");
        true
      }
      None => false,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.read().is_empty()
  }
}
