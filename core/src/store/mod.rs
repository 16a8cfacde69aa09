// core/src/store/mod.rs

pub mod cart_store;
pub mod ledger;
pub mod shared;

pub use cart_store::{CartStore, SyncOutcome};
pub use ledger::{CartLedger, CartOp, Ticket};
pub use shared::SharedState;
