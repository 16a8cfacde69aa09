// server/src/services/auth_service.rs

//! Password hashing and the in-memory user directory.

use crate::errors::AppError;
use crate::models::User;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use chrono::Utc;
use parking_lot::RwLock;
use schoolcart::EntityId;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Hashes a plain-text password with Argon2 and a random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Checks `provided_password` against a stored Argon2 hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the hash itself is unusable.
#[instrument(
  name = "auth_service::verify_password",
  skip(hashed_password_str, provided_password),
  err(Display),
  fields(hash_len = hashed_password_str.len())
)]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Accounts known to the server, keyed by username.
#[derive(Debug, Default)]
pub struct UserDirectory {
  users: RwLock<HashMap<String, User>>,
}

impl UserDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds an account, replacing any previous one with the same username.
  #[instrument(name = "users::register", skip(self, password), err(Display))]
  pub fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() {
      return Err(AppError::Validation("Username cannot be empty.".to_string()));
    }
    let user = User {
      id: EntityId::new(uuid::Uuid::new_v4().to_string()),
      username: username.to_string(),
      password_hash: hash_password(password)?,
      created_at: Utc::now(),
    };
    self.users.write().insert(user.username.clone(), user.clone());
    info!(userid = %user.id, "Registered user.");
    Ok(user)
  }

  /// Looks up `username` and verifies the password.
  ///
  /// Unknown users and wrong passwords produce the same error.
  #[instrument(name = "users::authenticate", skip(self, password), err(Display))]
  pub fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
    let user = self.users.read().get(username.trim()).cloned();
    let Some(user) = user else {
      warn!("Login for unknown user.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    };
    if verify_password(&user.password_hash, password)? {
      debug!(userid = %user.id, "Credentials accepted.");
      Ok(user)
    } else {
      warn!(userid = %user.id, "Wrong password.");
      Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
    }
  }
}
