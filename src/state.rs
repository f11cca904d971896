use crate::{
  auth::AuthService,
  config::TokenConfig,
  entity::{Entity, Username},
  error::*,
  jwt::{AdditionalClaimData, JwtSigningKey, TokenKind},
  log::*,
};
use jwt_simple::prelude::*;
use std::net::SocketAddr;

/// Freshly signed token together with the claims worth remembering server-side.
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub jti: Option<String>,
  /// unix seconds
  pub expires: i64,
}

pub struct CryptoState {
  signing_key: JwtSigningKey,
  access_token_ttl: Duration,
  refresh_token_ttl: Duration,
}

impl CryptoState {
  pub fn new(config: &TokenConfig) -> Self {
    Self {
      signing_key: JwtSigningKey::new(&config.algorithm, config.secret.as_bytes()),
      access_token_ttl: config.access_token_ttl,
      refresh_token_ttl: config.refresh_token_ttl,
    }
  }

  /// Access tokens carry no id; refresh tokens get a random `jti` for the rotation ledger.
  pub fn generate_token(&self, subject: &Username, kind: TokenKind) -> Result<IssuedToken> {
    let valid_for = match kind {
      TokenKind::Access => self.access_token_ttl,
      TokenKind::Refresh => self.refresh_token_ttl,
    };
    let mut claims =
      Claims::with_custom_claims(AdditionalClaimData { kind }, valid_for).with_subject(subject.as_str());
    let jti = match kind {
      TokenKind::Access => None,
      TokenKind::Refresh => Some(crate::hasher::generate_random_string(crate::constants::TOKEN_ID_LEN)),
    };
    if let Some(jti) = &jti {
      claims = claims.with_jwt_id(jti);
    }
    let expires = claims.expires_at.map(|e| e.as_secs() as i64).unwrap_or_default();

    let token = self.signing_key.sign(claims)?;
    debug!("[{}] Issued {} token, exp: {}", subject.as_str(), kind, expires);

    Ok(IssuedToken { token, jti, expires })
  }

  pub fn verify_token(&self, token: &str) -> Result<JWTClaims<AdditionalClaimData>> {
    self.signing_key.verify(token)
  }

  #[cfg(test)]
  pub(crate) fn sign_claims(&self, claims: JWTClaims<AdditionalClaimData>) -> Result<String> {
    self.signing_key.sign(claims)
  }
}

pub struct AppState {
  pub listen_socket: SocketAddr,
  pub auth: AuthService,
}
