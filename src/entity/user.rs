use super::{Email, EncodedHash, Entity, Username};
use crate::{constants::ADMIN_USERNAME, error::*};
use uuid::Uuid;

/// Credential record of a subscriber as held by the user store.
#[derive(Debug, Clone)]
pub struct User {
  pub id: String,
  pub username: Username,
  pub email: Email,
  pub encoded_hash: EncodedHash,
  pub is_active: bool,
  pub is_admin: bool,
  pub created_at: i64,
}

impl User {
  /// Fresh active account. Only the reserved admin name gets admin rights.
  pub fn new(username: &Username, email: &Email, encoded_hash: EncodedHash) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      username: username.to_owned(),
      email: email.to_owned(),
      encoded_hash,
      is_active: true,
      is_admin: username.as_str() == ADMIN_USERNAME,
      created_at: chrono::Utc::now().timestamp(),
    }
  }

  pub fn username(&self) -> &str {
    self.username.as_str()
  }
  pub fn email(&self) -> &str {
    self.email.as_str()
  }
  pub fn encoded_hash(&self) -> &EncodedHash {
    &self.encoded_hash
  }
  pub fn is_active(&self) -> bool {
    self.is_active
  }
  pub fn is_admin(&self) -> bool {
    self.is_admin
  }
}

/// Explicit set of mutable user columns. Identity fields are never updated.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
  pub encoded_hash: Option<EncodedHash>,
  pub is_active: Option<bool>,
}

impl UserUpdate {
  pub fn password(encoded_hash: EncodedHash) -> Self {
    Self {
      encoded_hash: Some(encoded_hash),
      ..Default::default()
    }
  }
  pub fn deactivate() -> Self {
    Self {
      is_active: Some(false),
      ..Default::default()
    }
  }
  pub fn ensure_not_empty(&self) -> Result<()> {
    ensure!(
      self.encoded_hash.is_some() || self.is_active.is_some(),
      "Both or either one of password hash and active flag must be specified"
    );
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::TryNewEntity;

  fn hash() -> EncodedHash {
    EncodedHash::new("$argon2id$v=19$m=4096,t=3,p=4$c2FsdA$aGFzaA").unwrap()
  }

  #[test]
  fn new_user_is_active_and_not_admin() {
    let user = User::new(
      &Username::new("alice").unwrap(),
      &Email::new("alice@example.com").unwrap(),
      hash(),
    );
    assert!(user.is_active());
    assert!(!user.is_admin());
    assert!(Uuid::parse_str(&user.id).is_ok());
  }

  #[test]
  fn reserved_admin_name_is_admin() {
    let user = User::new(
      &Username::new(ADMIN_USERNAME).unwrap(),
      &Email::new("admin@example.com").unwrap(),
      hash(),
    );
    assert!(user.is_admin());
  }

  #[test]
  fn empty_update_is_rejected() {
    assert!(UserUpdate::default().ensure_not_empty().is_err());
    assert!(UserUpdate::deactivate().ensure_not_empty().is_ok());
    assert!(UserUpdate::password(hash()).ensure_not_empty().is_ok());
  }
}
