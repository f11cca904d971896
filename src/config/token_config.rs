use crate::{
  constants::{GENERATED_SECRET_LEN, MIN_SIGNING_SECRET_LEN},
  error::*,
  jwt::Algorithm,
};
use base64::{engine::general_purpose, Engine as _};
use jwt_simple::prelude::Duration;
use rand::RngCore;

/// Shared HMAC secret. Supplied base64 encoded from the environment or a file.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
  pub fn from_base64(encoded: &str) -> Result<Self> {
    let bytes = general_purpose::STANDARD
      .decode(encoded.trim())
      .map_err(|e| anyhow!("Signing secret is not valid base64: {e}"))?;
    ensure!(
      bytes.len() >= MIN_SIGNING_SECRET_LEN,
      "Signing secret must be at least {MIN_SIGNING_SECRET_LEN} bytes long"
    );
    Ok(Self(bytes))
  }

  pub fn generate_base64() -> String {
    let mut bytes = [0u8; GENERATED_SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::STANDARD.encode(bytes)
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }
}

impl std::fmt::Debug for SigningSecret {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "SigningSecret({} bytes)", self.0.len())
  }
}

/// Everything the token signer needs, handed over at construction.
#[derive(Debug, Clone)]
pub struct TokenConfig {
  pub algorithm: Algorithm,
  pub secret: SigningSecret,
  pub access_token_ttl: Duration,
  pub refresh_token_ttl: Duration,
  pub rotate_refresh_tokens: bool,
}

impl TokenConfig {
  pub fn new(algorithm: Algorithm, secret: SigningSecret, access_ttl_mins: u64, refresh_ttl_days: u64) -> Result<Self> {
    ensure!(access_ttl_mins > 0, "Access token lifetime must be positive");
    ensure!(refresh_ttl_days > 0, "Refresh token lifetime must be positive");
    let access_token_ttl = Duration::from_mins(access_ttl_mins);
    let refresh_token_ttl = Duration::from_days(refresh_ttl_days);
    ensure!(
      refresh_token_ttl > access_token_ttl,
      "Refresh token must outlive the access token"
    );
    Ok(Self {
      algorithm,
      secret,
      access_token_ttl,
      refresh_token_ttl,
      rotate_refresh_tokens: false,
    })
  }

  pub fn with_rotation(mut self, rotate_refresh_tokens: bool) -> Self {
    self.rotate_refresh_tokens = rotate_refresh_tokens;
    self
  }
}
