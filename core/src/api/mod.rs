// core/src/api/mod.rs

//! Transport layer: the backend and catalog seams plus their HTTP implementations.

pub mod catalog;
pub mod gateway;
pub mod http;
mod response;

pub use catalog::CatalogSource;
pub use gateway::CartBackend;
pub use http::{HttpCatalog, HttpGateway};
