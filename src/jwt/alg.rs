use crate::error::*;
use std::str::FromStr;

/// Symmetric JWT algorithms accepted for the shared signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
  HS256,
  HS384,
  HS512,
}
impl FromStr for Algorithm {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    match s {
      "HS256" => Ok(Algorithm::HS256),
      "HS384" => Ok(Algorithm::HS384),
      "HS512" => Ok(Algorithm::HS512),
      _ => bail!("Invalid Algorithm Name"),
    }
  }
}
impl Algorithm {
  pub fn as_str(&self) -> &'static str {
    match self {
      Algorithm::HS256 => "HS256",
      Algorithm::HS384 => "HS384",
      Algorithm::HS512 => "HS512",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_hmac_algorithms() {
    for name in ["HS256", "HS384", "HS512"] {
      let alg = Algorithm::from_str(name).unwrap();
      assert_eq!(alg.as_str(), name);
    }
  }

  #[test]
  fn rejects_asymmetric_and_none() {
    assert!(Algorithm::from_str("ES256").is_err());
    assert!(Algorithm::from_str("none").is_err());
    assert!(Algorithm::from_str("hs256").is_err());
  }
}
