// core/src/store/ledger.rs

//! Confirmed cart snapshot plus the optimistic operations still in flight.
//!
//! The visible cart is never stored directly: it is the last authoritative
//! snapshot with every pending operation replayed on top, in the order the
//! operations were issued. A pending operation leaves the ledger either when
//! its write has been confirmed by a refresh or when the write failed, which
//! is what makes optimistic updates reversible.

use crate::model::{CartEntry, EntityId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
  Add(CartEntry),
  Remove(EntityId),
  Clear,
}

impl CartOp {
  /// Replays the operation. `Add` is idempotent: once the server snapshot
  /// already contains the entry, replaying it replaces rather than duplicates.
  pub fn apply(&self, entries: &mut Vec<CartEntry>) {
    match self {
      CartOp::Add(entry) => match entries.iter_mut().find(|e| e.id() == entry.id()) {
        Some(existing) => *existing = entry.clone(),
        None => entries.push(entry.clone()),
      },
      CartOp::Remove(id) => entries.retain(|e| e.id() != id),
      CartOp::Clear => entries.clear(),
    }
  }
}

/// Handle returned by [`CartLedger::begin`], used to settle the operation later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct CartLedger {
  confirmed: Vec<CartEntry>,
  pending: Vec<(Ticket, CartOp)>,
  next_ticket: u64,
}

impl CartLedger {
  pub fn confirmed(&self) -> &[CartEntry] {
    &self.confirmed
  }

  pub fn pending_len(&self) -> usize {
    self.pending.len()
  }

  pub fn view(&self) -> Vec<CartEntry> {
    let mut entries = self.confirmed.clone();
    for (_, op) in &self.pending {
      op.apply(&mut entries);
    }
    entries
  }

  /// Queues `op`. A `Remove` also cancels any pending `Add` of the same entry,
  /// so a late-settling upsert cannot bring the entry back.
  pub fn begin(&mut self, op: CartOp) -> Ticket {
    if let CartOp::Remove(id) = &op {
      self.pending.retain(|(_, pending)| !matches!(pending, CartOp::Add(entry) if entry.id() == id));
    }
    let ticket = Ticket(self.next_ticket);
    self.next_ticket += 1;
    self.pending.push((ticket, op));
    ticket
  }

  /// Drops a pending operation. Returns false if it was already gone (for
  /// example after a `reset`).
  pub fn settle(&mut self, ticket: Ticket) -> bool {
    let before = self.pending.len();
    self.pending.retain(|(t, _)| *t != ticket);
    self.pending.len() != before
  }

  pub fn confirm(&mut self, snapshot: Vec<CartEntry>) {
    self.confirmed = snapshot;
  }

  /// Forgets everything, pending operations included.
  pub fn reset(&mut self) {
    self.confirmed.clear();
    self.pending.clear();
  }
}
