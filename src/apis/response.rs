use crate::entity::User;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
  pub message: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ProfileResponse {
  pub username: String,
  pub email: String,
  pub is_active: bool,
  pub is_admin: bool,
}

impl From<&User> for ProfileResponse {
  fn from(user: &User) -> Self {
    Self {
      username: user.username().to_string(),
      email: user.email().to_string(),
      is_active: user.is_active(),
      is_admin: user.is_admin(),
    }
  }
}
