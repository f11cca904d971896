use super::{Entity, TryNewEntity};
use crate::error::*;
use std::borrow::Cow;
use validator::Validate;

/// Plaintext password. Never printed, not even through `Debug`.
#[derive(Clone, Validate)]
pub struct Password {
  #[validate(length(min = 1, max = 1024))]
  value: String,
}
impl<'a, T: Into<Cow<'a, str>>> TryNewEntity<T> for Password {
  fn new(password: T) -> Result<Self> {
    let value = password.into().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Entity for Password {
  fn as_str(&self) -> &str {
    &self.value
  }
}
impl std::fmt::Debug for Password {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("Password(***)")
  }
}
