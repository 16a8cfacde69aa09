// server/src/web/mod.rs

pub mod auth_user;
pub mod handlers;
pub mod routes;

pub use auth_user::AuthenticatedUser;
pub use routes::configure_app_routes;
