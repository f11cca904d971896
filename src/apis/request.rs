use crate::{
  entity::{Email, Password, TryNewEntity, Username},
  error::*,
};
use serde::Deserialize;

/// Maps a failed entity validation to a 400 naming the offending field.
fn field<T>(name: &str, res: Result<T>) -> AuthResult<T> {
  res.map_err(|_| AuthError::InvalidRequest(format!("invalid {name}")))
}

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterRequest {
  username: String,
  email: String,
  password: String,
}
impl RegisterRequest {
  pub fn username(&self) -> AuthResult<Username> {
    field("username", Username::new(&self.username))
  }
  pub fn email(&self) -> AuthResult<Email> {
    field("email", Email::new(&self.email))
  }
  pub fn password(&self) -> AuthResult<Password> {
    field("password", Password::new(&self.password))
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
  username: String,
  password: String,
}
impl LoginRequest {
  pub fn username(&self) -> AuthResult<Username> {
    field("username", Username::new(&self.username))
  }
  pub fn password(&self) -> AuthResult<Password> {
    field("password", Password::new(&self.password))
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RefreshRequest {
  pub refresh_token: String,
}

/// Exactly one of username and email identifies the account.
#[derive(Deserialize, Debug, Clone)]
pub struct ResetPasswordRequest {
  username: Option<String>,
  email: Option<String>,
  current_password: String,
  new_password: String,
}

pub enum Identity {
  Username(Username),
  Email(Email),
}

impl ResetPasswordRequest {
  pub fn identity(&self) -> AuthResult<Identity> {
    match (&self.username, &self.email) {
      (Some(u), None) => Ok(Identity::Username(field("username", Username::new(u))?)),
      (None, Some(e)) => Ok(Identity::Email(field("email", Email::new(e))?)),
      _ => Err(AuthError::InvalidRequest(
        "either username or email must be specified".to_string(),
      )),
    }
  }
  pub fn current_password(&self) -> AuthResult<Password> {
    field("current_password", Password::new(&self.current_password))
  }
  pub fn new_password(&self) -> AuthResult<Password> {
    field("new_password", Password::new(&self.new_password))
  }
}
