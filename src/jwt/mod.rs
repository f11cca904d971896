mod alg;
mod claims;
mod signing_key;

pub use alg::Algorithm;
pub use claims::{AdditionalClaimData, TokenKind};
pub use signing_key::JwtSigningKey;
