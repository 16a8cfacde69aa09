// core/src/model/mod.rs

//! Data shared by the client core and the server.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod ids;

pub use auth::{AuthUser, Credentials};
pub use cart::{CartEntry, CartEntryPayload, CartItem, CartSummary, MAX_QUANTITY, MIN_QUANTITY};
pub use catalog::{EquipmentItem, EquipmentList, NamedRef};
pub use ids::EntityId;
