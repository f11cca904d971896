use serde::{Deserialize, Serialize};

/// Distinguishes the two bearer tokens so that one can never stand in for the other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
  Access,
  Refresh,
}

impl std::fmt::Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TokenKind::Access => f.write_str("access"),
      TokenKind::Refresh => f.write_str("refresh"),
    }
  }
}

/// Custom part of the claim set, flattened next to the registered claims.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdditionalClaimData {
  pub kind: TokenKind,
}
