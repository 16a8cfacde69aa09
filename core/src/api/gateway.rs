// core/src/api/gateway.rs

//! The backend collaborator seen by the cart store and the session.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::model::{AuthUser, CartEntry, Credentials, EntityId};

/// Remote operations owned by the backend: session handling and cart storage.
///
/// Mutating cart calls return the cart as stored after the write.
#[async_trait]
pub trait CartBackend: Send + Sync {
  async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthUser>;

  async fn logout(&self) -> GatewayResult<()>;

  /// Identity of the current session, or an error if there is none.
  async fn check_auth(&self) -> GatewayResult<AuthUser>;

  async fn get_cart(&self, userid: &EntityId) -> GatewayResult<Vec<CartEntry>>;

  /// Replaces the whole stored cart with `entries`.
  async fn update_cart(&self, userid: &EntityId, entries: &[CartEntry]) -> GatewayResult<Vec<CartEntry>>;

  /// Appends `entry`, or replaces the stored entry with the same id.
  async fn upsert_entry(&self, userid: &EntityId, entry: &CartEntry) -> GatewayResult<Vec<CartEntry>>;

  /// Removes one entry. Removing an unknown id is not an error.
  async fn delete_entry(&self, userid: &EntityId, entry_id: &EntityId) -> GatewayResult<Vec<CartEntry>>;
}
