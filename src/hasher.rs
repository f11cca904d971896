use crate::{
  constants::{ARGON2_CONFIG, ARGON2_SALT_LEN},
  entity::{EncodedHash, Entity, Password, TryNewEntity},
  error::*,
};
use rand::prelude::*;

/// One-way salted password hashing used by the credential service.
pub trait PasswordHasher: Send + Sync {
  fn hash(&self, password: &Password) -> Result<EncodedHash>;
  fn verify(&self, password: &Password, encoded_hash: &EncodedHash) -> Result<bool>;
}

/// Argon2id with a fresh random salt per hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
  fn hash(&self, password: &Password) -> Result<EncodedHash> {
    let mut salt = [0u8; ARGON2_SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let hash = argon2::hash_encoded(password.as_str().as_bytes(), &salt, &ARGON2_CONFIG)?;

    EncodedHash::new(hash)
  }

  fn verify(&self, password: &Password, encoded_hash: &EncodedHash) -> Result<bool> {
    let matches = argon2::verify_encoded(encoded_hash.as_str(), password.as_str().as_bytes())?;

    Ok(matches)
  }
}

pub fn generate_random_string(length: usize) -> String {
  rand::thread_rng()
    .sample_iter(&rand::distributions::Alphanumeric)
    .take(length)
    .map(char::from)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn argon2_works() {
    let password = Password::new("password").unwrap();
    let hash = Argon2Hasher.hash(&password);
    assert!(hash.is_ok());
    let hash = hash.unwrap();
    assert!(hash.as_str().starts_with("$argon2id$v=19$m=4096,t=3,p=4$"));

    let verify = Argon2Hasher.verify(&password, &hash);
    assert!(verify.is_ok());
    assert!(verify.unwrap());
  }

  #[test]
  fn argon2_rejects_other_password() {
    let hash = Argon2Hasher.hash(&Password::new("pw1").unwrap()).unwrap();
    let verify = Argon2Hasher.verify(&Password::new("pw2").unwrap(), &hash);
    assert!(!verify.unwrap());
  }

  #[test]
  fn argon2_salts_every_hash() {
    let password = Password::new("same password").unwrap();
    let a = Argon2Hasher.hash(&password).unwrap();
    let b = Argon2Hasher.hash(&password).unwrap();
    assert_ne!(a.as_str(), b.as_str());
    assert!(Argon2Hasher.verify(&password, &a).unwrap());
    assert!(Argon2Hasher.verify(&password, &b).unwrap());
  }

  #[test]
  fn malformed_hash_is_an_error() {
    let password = Password::new("password").unwrap();
    let broken = EncodedHash::new("not-a-phc-string").unwrap();
    assert!(Argon2Hasher.verify(&password, &broken).is_err());
  }

  #[test]
  fn random_string_works() {
    let length = 32;
    let random_string = generate_random_string(length);
    assert_eq!(random_string.len(), length);
    assert!(random_string.chars().all(|c| c.is_ascii_alphanumeric()));
  }
}
