use super::{Entity, TryNewEntity};
use crate::error::*;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use validator::Validate;

#[derive(Debug, Clone, Eq, PartialEq, Validate)]
pub struct Email {
  #[validate(email, length(max = 254))]
  value: String,
}
impl<'a, T: Into<Cow<'a, str>>> TryNewEntity<T> for Email {
  fn new(email: T) -> Result<Self> {
    let value = email.into().trim().to_ascii_lowercase();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Entity for Email {
  fn as_str(&self) -> &str {
    &self.value
  }
}
impl Serialize for Email {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_is_normalized() {
    let email = Email::new("  Alice@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "alice@example.com");
  }

  #[test]
  fn email_rejects_garbage() {
    assert!(Email::new("not-an-email").is_err());
    assert!(Email::new("").is_err());
  }
}
