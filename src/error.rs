pub use anyhow::{anyhow, bail, ensure, Error, Result};
use thiserror::Error as ThisError;

/// Failures reported by the credential and token service.
///
/// Unknown users and wrong passwords both collapse into `InvalidCredentials`
/// so that a login response never tells whether a username exists.
#[derive(Debug, ThisError)]
pub enum AuthError {
  #[error("Invalid username or password")]
  InvalidCredentials,
  #[error("User not found")]
  NotFound,
  #[error("Invalid token")]
  TokenInvalid,
  #[error("Token expired")]
  TokenExpired,
  #[error("Missing bearer token")]
  MissingToken,
  #[error("Conflict: {0}")]
  Conflict(String),
  #[error("Forbidden: {0}")]
  Forbidden(String),
  #[error("Invalid request: {0}")]
  InvalidRequest(String),
  #[error("User store unavailable: {0}")]
  StoreUnavailable(#[source] anyhow::Error),
  #[error("Internal error: {0}")]
  Internal(#[source] anyhow::Error),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Insert failures of the user store. A unique column clash is kept apart from store outages.
#[derive(Debug, ThisError)]
pub enum AddUserError {
  #[error("Duplicate {0}")]
  Duplicate(&'static str),
  #[error(transparent)]
  Store(#[from] anyhow::Error),
}
