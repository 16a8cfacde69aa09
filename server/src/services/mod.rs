// server/src/services/mod.rs

pub mod auth_service;
pub mod cart_repository;
pub mod catalog_mock;
pub mod session_registry;

pub use auth_service::UserDirectory;
pub use cart_repository::CartRepository;
pub use catalog_mock::MockCatalog;
pub use session_registry::{SessionRegistry, SESSION_COOKIE};
