use super::{Entity, TryNewEntity};
use crate::error::*;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Validate)]
pub struct Username {
  #[validate(length(min = 1, max = 64), custom = "validate_username_chars")]
  value: String,
}

fn validate_username_chars(value: &str) -> std::result::Result<(), ValidationError> {
  if value
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
  {
    Ok(())
  } else {
    Err(ValidationError::new("username_chars"))
  }
}

impl<'a, T: Into<Cow<'a, str>>> TryNewEntity<T> for Username {
  fn new(username: T) -> Result<Self> {
    let value = username.into().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Entity for Username {
  fn as_str(&self) -> &str {
    &self.value
  }
}
impl std::fmt::Display for Username {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.value)
  }
}
impl Serialize for Username {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}
