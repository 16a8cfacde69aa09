// core/src/model/auth.rs

use serde::{Deserialize, Serialize};

use super::ids::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }

  /// Both fields must contain something other than whitespace.
  pub fn is_complete(&self) -> bool {
    !self.username.trim().is_empty() && !self.password.trim().is_empty()
  }
}

/// Identity returned by login and the session check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
  pub userid: EntityId,
  pub username: String,
}
