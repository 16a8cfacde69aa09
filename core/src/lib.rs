// src/lib.rs

//! schoolcart: client core for the school equipment store.
//!
//! A user picks a school, then a grade, then a class, reviews the generated
//! equipment list and saves it as a cart entry. This crate holds everything
//! behind that flow that is not rendering:
//!  - A typed API gateway (`HttpGateway`) for login/logout/session checks and
//!    cart reads/writes, with error responses normalized into `GatewayError`.
//!  - A catalog client (`HttpCatalog`) for the school/grade/class/equipment data.
//!  - `CartStore`: optimistic local updates reconciled with the backend, with
//!    rollback of changes whose write failed.
//!  - `Session`: authentication state restored at startup, changed on login and
//!    torn down (together with the cached cart) on logout.
//!  - `SearchableSelect`, `EquipmentPresenter` and `SelectionFunnel`: the state
//!    machines behind the pickers, the equipment table and the page itself.

pub mod api;
pub mod config;
pub mod error;
pub mod funnel;
pub mod model;
pub mod presenter;
pub mod select;
pub mod session;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::api::{CartBackend, CatalogSource, HttpCatalog, HttpGateway};
pub use crate::config::ClientConfig;
pub use crate::error::{CartError, CartResult, ConfigError, GatewayError, GatewayResult};
pub use crate::funnel::{SelectionFunnel, SAVE_COOLDOWN};
pub use crate::model::{
  AuthUser, CartEntry, CartEntryPayload, CartItem, CartSummary, Credentials, EntityId, EquipmentItem,
  EquipmentList, NamedRef, MAX_QUANTITY, MIN_QUANTITY,
};
pub use crate::presenter::{clamp_quantity, parse_quantity_input, EquipmentPresenter, EquipmentRow};
pub use crate::select::SearchableSelect;
pub use crate::session::{MemorySessionStorage, Session, SessionError, SessionHandle, SessionState, SessionStorage};
pub use crate::store::{CartStore, SyncOutcome};
