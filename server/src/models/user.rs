// server/src/models/user.rs

use chrono::{DateTime, Utc};
use schoolcart::{AuthUser, EntityId};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
  pub id: EntityId,
  pub username: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// The public view returned by login and the auth status check.
  pub fn auth_user(&self) -> AuthUser {
    AuthUser {
      userid: self.id.clone(),
      username: self.username.clone(),
    }
  }
}
