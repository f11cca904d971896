use super::{alg::Algorithm, claims::AdditionalClaimData};
use crate::{constants::TOKEN_TIME_TOLERANCE_SECS, error::*};
use jwt_simple::prelude::*;

/// HMAC key shared by the issuer and the verifier.
pub enum JwtSigningKey {
  HS256(HS256Key),
  HS384(HS384Key),
  HS512(HS512Key),
}

impl JwtSigningKey {
  pub fn new(algorithm: &Algorithm, secret: &[u8]) -> Self {
    match algorithm {
      Algorithm::HS256 => JwtSigningKey::HS256(HS256Key::from_bytes(secret)),
      Algorithm::HS384 => JwtSigningKey::HS384(HS384Key::from_bytes(secret)),
      Algorithm::HS512 => JwtSigningKey::HS512(HS512Key::from_bytes(secret)),
    }
  }

  pub fn sign(&self, claims: JWTClaims<AdditionalClaimData>) -> Result<String> {
    match self {
      JwtSigningKey::HS256(k) => k.authenticate(claims),
      JwtSigningKey::HS384(k) => k.authenticate(claims),
      JwtSigningKey::HS512(k) => k.authenticate(claims),
    }
  }

  /// Checks signature, `exp` and `nbf`, allowing `TOKEN_TIME_TOLERANCE_SECS` of clock skew.
  /// The caller inspects the kind claim.
  pub fn verify(&self, token: &str) -> Result<JWTClaims<AdditionalClaimData>> {
    let options = VerificationOptions {
      time_tolerance: Some(Duration::from_secs(TOKEN_TIME_TOLERANCE_SECS)),
      ..Default::default()
    };
    match self {
      JwtSigningKey::HS256(k) => k.verify_token::<AdditionalClaimData>(token, Some(options)),
      JwtSigningKey::HS384(k) => k.verify_token::<AdditionalClaimData>(token, Some(options)),
      JwtSigningKey::HS512(k) => k.verify_token::<AdditionalClaimData>(token, Some(options)),
    }
  }
}
