// core/src/store/cart_store.rs

//! The client-side cart: single source of truth for the UI, reconciled with
//! the backend after every mutation.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::ledger::{CartLedger, CartOp, Ticket};
use super::shared::SharedState;
use crate::api::CartBackend;
use crate::error::{CartError, CartResult, GatewayError};
use crate::model::{CartEntry, CartEntryPayload, CartSummary, EntityId};
use crate::session::SessionHandle;

/// Result of a mutation whose remote write was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
  /// The backend accepted the write and the cart was refetched.
  Persisted,
  /// The write failed; the optimistic change was undone and the message is
  /// available through [`CartStore::error`].
  RolledBack(String),
}

impl SyncOutcome {
  pub fn is_persisted(&self) -> bool {
    matches!(self, SyncOutcome::Persisted)
  }
}

#[derive(Debug, Default)]
struct CartState {
  ledger: CartLedger,
  loading: bool,
  error: Option<String>,
}

/// Holds the current user's cart.
///
/// Every mutation is applied optimistically, written to the backend with a
/// per-entry operation (or a full replace for `clear_cart`), then reconciled
/// with a mandatory `refresh_cart`. A failed write removes the optimistic
/// change again and records the message in `error`.
///
/// Clones share state, so one store can be handed to several UI tasks.
pub struct CartStore<B: CartBackend> {
  backend: Arc<B>,
  session: SessionHandle,
  state: SharedState<CartState>,
}

impl<B: CartBackend> Clone for CartStore<B> {
  fn clone(&self) -> Self {
    Self {
      backend: Arc::clone(&self.backend),
      session: self.session.clone(),
      state: self.state.clone(),
    }
  }
}

impl<B: CartBackend> CartStore<B> {
  pub fn new(backend: Arc<B>, session: SessionHandle) -> Self {
    Self {
      backend,
      session,
      state: SharedState::new(CartState::default()),
    }
  }

  /// The cart as the UI should show it: confirmed entries plus pending changes.
  pub fn entries(&self) -> Vec<CartEntry> {
    self.state.read().ledger.view()
  }

  pub fn summary(&self) -> CartSummary {
    CartSummary::of(&self.entries())
  }

  pub fn is_loading(&self) -> bool {
    self.state.read().loading
  }

  pub fn error(&self) -> Option<String> {
    self.state.read().error.clone()
  }

  pub fn has_pending(&self) -> bool {
    self.state.read().ledger.pending_len() > 0
  }

  /// Drops all local cart data. Called when the user logs out.
  pub fn reset(&self) {
    self.state.update(|s| {
      s.ledger.reset();
      s.loading = false;
      s.error = None;
    });
    debug!("Cart store reset.");
  }

  /// Replaces the confirmed cart with the backend's copy.
  ///
  /// Without a logged-in user the cart is simply empty; that is not an error
  /// and no request is made.
  #[instrument(name = "cart_store::refresh", skip(self))]
  pub async fn refresh_cart(&self) {
    let Some(userid) = self.session.userid() else {
      self.state.update(|s| {
        s.ledger.reset();
        s.loading = false;
      });
      debug!("No user; cart emptied without a fetch.");
      return;
    };

    self.state.update(|s| {
      s.loading = true;
      s.error = None;
    });

    let fetched = self.backend.get_cart(&userid).await;

    self.state.update(|s| {
      match fetched {
        Ok(entries) => {
          debug!(count = entries.len(), "Cart refreshed.");
          s.ledger.confirm(entries);
        }
        Err(e) => {
          warn!(error = %e, "Cart refresh failed.");
          s.error = Some(e.to_string());
          s.ledger.confirm(Vec::new());
        }
      }
      s.loading = false;
    });
  }

  /// Saves a new entry built from `payload` and returns it with the outcome.
  #[instrument(
    name = "cart_store::add",
    skip(self, payload),
    fields(school = %payload.school.id, grade = %payload.grade.id, class = %payload.class.id, items = payload.items.len())
  )]
  pub async fn add_to_cart(&self, payload: CartEntryPayload) -> CartResult<(CartEntry, SyncOutcome)> {
    let userid = self.require_user()?;
    let entry = CartEntry::from_payload(payload);
    let ticket = self.begin(CartOp::Add(entry.clone()));

    let written = self.backend.upsert_entry(&userid, &entry).await;
    let outcome = self.finish(ticket, written.map(|_| ())).await;
    if outcome.is_persisted() {
      info!(entry_id = %entry.id(), "Cart entry saved.");
    }
    Ok((entry, outcome))
  }

  #[instrument(name = "cart_store::remove", skip(self), fields(entry_id = %id))]
  pub async fn remove_from_cart(&self, id: &EntityId) -> CartResult<SyncOutcome> {
    let userid = self.require_user()?;
    let ticket = self.begin(CartOp::Remove(id.clone()));
    let written = self.backend.delete_entry(&userid, id).await;
    Ok(self.finish(ticket, written.map(|_| ())).await)
  }

  #[instrument(name = "cart_store::clear", skip(self))]
  pub async fn clear_cart(&self) -> CartResult<SyncOutcome> {
    let userid = self.require_user()?;
    let ticket = self.begin(CartOp::Clear);
    let written = self.backend.update_cart(&userid, &[]).await;
    Ok(self.finish(ticket, written.map(|_| ())).await)
  }

  fn require_user(&self) -> CartResult<EntityId> {
    self.session.userid().ok_or_else(|| {
      warn!("Cart mutation attempted without an authenticated user.");
      CartError::Unauthenticated
    })
  }

  fn begin(&self, op: CartOp) -> Ticket {
    self.state.update(|s| {
      s.error = None;
      s.ledger.begin(op)
    })
  }

  /// Reconciles after a write: on success refetch, then retire the pending
  /// operation (the refetched snapshot now contains it); on failure retire it
  /// straight away, which undoes the optimistic change.
  async fn finish(&self, ticket: Ticket, written: Result<(), GatewayError>) -> SyncOutcome {
    match written {
      Ok(()) => {
        self.refresh_cart().await;
        self.state.write().ledger.settle(ticket);
        SyncOutcome::Persisted
      }
      Err(e) => {
        let message = e.to_string();
        warn!(error = %message, "Cart write failed; rolling back optimistic change.");
        self.state.update(|s| {
          s.ledger.settle(ticket);
          s.error = Some(message.clone());
        });
        SyncOutcome::RolledBack(message)
      }
    }
  }
}
