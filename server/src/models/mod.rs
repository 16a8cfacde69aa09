// server/src/models/mod.rs

//! Server-side records. Cart and catalog shapes come from `schoolcart`.

pub mod user;

pub use user::User;
