mod email;
mod encoded_hash;
mod password;
mod user;
mod username;

use crate::error::{Error, Result};

pub use email::Email;
pub use encoded_hash::EncodedHash;
pub use password::Password;
pub use user::{User, UserUpdate};
pub use username::Username;

pub trait Entity
where
  Self: std::marker::Sized,
{
  fn as_str(&self) -> &str;
}

pub trait TryNewEntity<T>
where
  Self: std::marker::Sized,
{
  fn new(input: T) -> Result<Self, Error>;
}
