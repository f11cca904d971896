use crate::{
  config::TokenConfig,
  constants::{ADMIN_USERNAME, PASSWORD_LEN, TOKEN_TYPE},
  entity::{Email, EncodedHash, Entity, Password, TryNewEntity, User, UserUpdate, Username},
  error::*,
  hasher::{generate_random_string, PasswordHasher},
  jwt::{AdditionalClaimData, TokenKind},
  log::*,
  state::CryptoState,
  table::{RefreshTokenRecord, RefreshTokenTable, UserSearchKey, UserTable},
};
use jwt_simple::{prelude::JWTClaims, JWTError};
use serde::Serialize;
use std::sync::Arc;

/// Body returned by login and refresh.
#[derive(Serialize, Debug, Clone)]
pub struct TokenPair {
  pub access_token: String,
  pub refresh_token: String,
  pub token_type: String,
}

impl TokenPair {
  fn new(access_token: String, refresh_token: String) -> Self {
    Self {
      access_token,
      refresh_token,
      token_type: TOKEN_TYPE.to_string(),
    }
  }
}

/// Credential verification plus issuance and validation of bearer tokens.
pub struct AuthService {
  crypto: CryptoState,
  user_table: Arc<dyn UserTable>,
  refresh_token_table: Arc<dyn RefreshTokenTable>,
  hasher: Arc<dyn PasswordHasher>,
  rotate_refresh_tokens: bool,
  /// verified against when the user is unknown so both paths cost one hash
  dummy_hash: EncodedHash,
}

impl AuthService {
  pub fn new(
    config: &TokenConfig,
    user_table: Arc<dyn UserTable>,
    refresh_token_table: Arc<dyn RefreshTokenTable>,
    hasher: Arc<dyn PasswordHasher>,
  ) -> Result<Self> {
    let dummy_hash = hasher.hash(&Password::new(generate_random_string(PASSWORD_LEN))?)?;
    Ok(Self {
      crypto: CryptoState::new(config),
      user_table,
      refresh_token_table,
      hasher,
      rotate_refresh_tokens: config.rotate_refresh_tokens,
      dummy_hash,
    })
  }

  async fn find_user(&self, key: UserSearchKey<'_>) -> AuthResult<Option<User>> {
    self.user_table.find_user(key).await.map_err(AuthError::StoreUnavailable)
  }

  /// Unknown user, deactivated account and wrong password are indistinguishable to the caller.
  pub async fn verify_credentials(&self, username: &Username, password: &Password) -> AuthResult<User> {
    let Some(user) = self.find_user(UserSearchKey::Username(username)).await? else {
      let _ = self.hasher.verify(password, &self.dummy_hash);
      debug!("[{}] Unknown user", username.as_str());
      return Err(AuthError::InvalidCredentials);
    };

    let verified = self
      .hasher
      .verify(password, user.encoded_hash())
      .map_err(AuthError::Internal)?;
    if !verified {
      debug!("[{}] Password mismatch", username.as_str());
      return Err(AuthError::InvalidCredentials);
    }
    if !user.is_active() {
      debug!("[{}] Deactivated user attempted to authenticate", username.as_str());
      return Err(AuthError::InvalidCredentials);
    }
    Ok(user)
  }

  pub fn issue_access_token(&self, subject: &Username) -> AuthResult<String> {
    let issued = self
      .crypto
      .generate_token(subject, TokenKind::Access)
      .map_err(AuthError::Internal)?;
    Ok(issued.token)
  }

  /// With rotation enabled the token id is recorded so that it can be consumed exactly once.
  pub async fn issue_refresh_token(&self, subject: &Username) -> AuthResult<String> {
    let issued = self
      .crypto
      .generate_token(subject, TokenKind::Refresh)
      .map_err(AuthError::Internal)?;

    if self.rotate_refresh_tokens {
      let Some(jti) = issued.jti else {
        return Err(AuthError::Internal(anyhow!("Refresh token without token id")));
      };
      let record = RefreshTokenRecord {
        jti,
        subject: subject.to_owned(),
        expires: issued.expires,
      };
      self
        .refresh_token_table
        .add_and_prune(&record)
        .await
        .map_err(AuthError::StoreUnavailable)?;
    }
    Ok(issued.token)
  }

  fn verify_claims(&self, token: &str, expected: TokenKind) -> AuthResult<(Username, JWTClaims<AdditionalClaimData>)> {
    let claims = self.crypto.verify_token(token).map_err(|e| match e.downcast_ref::<JWTError>() {
      Some(JWTError::TokenHasExpired) => AuthError::TokenExpired,
      _ => {
        debug!("Token rejected: {e}");
        AuthError::TokenInvalid
      }
    })?;

    if claims.custom.kind != expected {
      debug!("Expected {} token but got {}", expected, claims.custom.kind);
      return Err(AuthError::TokenInvalid);
    }
    let Some(Ok(subject)) = claims.subject.as_deref().map(Username::new) else {
      return Err(AuthError::TokenInvalid);
    };
    Ok((subject, claims))
  }

  /// Returns the subject of a token of the expected kind.
  pub fn verify_token(&self, token: &str, expected: TokenKind) -> AuthResult<Username> {
    let (subject, _) = self.verify_claims(token, expected)?;
    Ok(subject)
  }

  /// Subject of a token must still exist and be active.
  async fn active_subject(&self, subject: &Username) -> AuthResult<User> {
    match self.find_user(UserSearchKey::Username(subject)).await? {
      Some(user) if user.is_active() => Ok(user),
      _ => {
        debug!("[{}] Token subject is missing or deactivated", subject.as_str());
        Err(AuthError::TokenInvalid)
      }
    }
  }

  pub async fn refresh_access_token(&self, refresh_token: &str) -> AuthResult<TokenPair> {
    let (subject, claims) = self.verify_claims(refresh_token, TokenKind::Refresh)?;
    self.active_subject(&subject).await?;

    if !self.rotate_refresh_tokens {
      let access_token = self.issue_access_token(&subject)?;
      return Ok(TokenPair::new(access_token, refresh_token.to_string()));
    }

    let Some(jti) = claims.jwt_id else {
      return Err(AuthError::TokenInvalid);
    };
    let consumed = self
      .refresh_token_table
      .consume(&jti)
      .await
      .map_err(AuthError::StoreUnavailable)?;
    if !consumed {
      let revoked = self
        .refresh_token_table
        .revoke_subject(&subject)
        .await
        .map_err(AuthError::StoreUnavailable)?;
      warn!(
        "[{}] Refresh token reuse detected. Revoked {} outstanding refresh tokens",
        subject.as_str(),
        revoked
      );
      return Err(AuthError::TokenInvalid);
    }

    let access_token = self.issue_access_token(&subject)?;
    let refresh_token = self.issue_refresh_token(&subject).await?;
    debug!("[{}] Rotated refresh token", subject.as_str());
    Ok(TokenPair::new(access_token, refresh_token))
  }

  /// Requires the current password. The account is looked up by username or by email.
  pub async fn reset_password(
    &self,
    identity: UserSearchKey<'_>,
    current_password: &Password,
    new_password: &Password,
  ) -> AuthResult<()> {
    let Some(user) = self.find_user(identity).await? else {
      return Err(AuthError::NotFound);
    };

    let verified = self
      .hasher
      .verify(current_password, user.encoded_hash())
      .map_err(AuthError::Internal)?;
    if !verified || !user.is_active() {
      return Err(AuthError::InvalidCredentials);
    }

    let encoded_hash = self.hasher.hash(new_password).map_err(AuthError::Internal)?;
    let updated = self
      .user_table
      .update_user(
        UserSearchKey::Username(&user.username),
        &UserUpdate::password(encoded_hash),
      )
      .await
      .map_err(AuthError::StoreUnavailable)?;
    if !updated {
      return Err(AuthError::NotFound);
    }

    info!("[{}] Password was reset", user.username());
    Ok(())
  }

  fn taken(column: &str) -> AuthError {
    AuthError::Conflict(format!("{column} is already taken"))
  }

  pub async fn register(&self, username: &Username, email: &Email, password: &Password) -> AuthResult<User> {
    if self.find_user(UserSearchKey::Username(username)).await?.is_some() {
      return Err(Self::taken("username"));
    }
    if self.find_user(UserSearchKey::Email(email)).await?.is_some() {
      return Err(Self::taken("email"));
    }

    let encoded_hash = self.hasher.hash(password).map_err(AuthError::Internal)?;
    let user = User::new(username, email, encoded_hash);
    // a concurrent registration may still win between the lookups and the insert
    match self.user_table.add(user.clone()).await {
      Ok(()) => (),
      Err(AddUserError::Duplicate(column)) => return Err(Self::taken(column)),
      Err(AddUserError::Store(e)) => return Err(AuthError::StoreUnavailable(e)),
    }

    info!("[{}] Registered a new user", user.username());
    Ok(user)
  }

  pub async fn login(&self, username: &Username, password: &Password) -> AuthResult<TokenPair> {
    let user = self.verify_credentials(username, password).await?;
    let access_token = self.issue_access_token(&user.username)?;
    let refresh_token = self.issue_refresh_token(&user.username).await?;
    debug!("[{}] Logged in", user.username());
    Ok(TokenPair::new(access_token, refresh_token))
  }

  pub async fn current_user(&self, access_token: &str) -> AuthResult<User> {
    let subject = self.verify_token(access_token, TokenKind::Access)?;
    self.active_subject(&subject).await
  }

  /// Users may deactivate themselves. Admins may deactivate any non-admin account.
  pub async fn deactivate(&self, actor_access_token: &str, target: &Username) -> AuthResult<()> {
    let actor = self.current_user(actor_access_token).await?;

    if target.as_str() == ADMIN_USERNAME {
      return Err(AuthError::Forbidden("the admin account cannot be deactivated".to_string()));
    }
    if actor.username() != target.as_str() && !actor.is_admin() {
      return Err(AuthError::Forbidden("not allowed to deactivate other users".to_string()));
    }

    let Some(target_user) = self.find_user(UserSearchKey::Username(target)).await? else {
      return Err(AuthError::NotFound);
    };
    if target_user.is_admin() {
      return Err(AuthError::Forbidden("admin accounts cannot be deactivated".to_string()));
    }

    let updated = self
      .user_table
      .update_user(UserSearchKey::Username(target), &UserUpdate::deactivate())
      .await
      .map_err(AuthError::StoreUnavailable)?;
    if !updated {
      return Err(AuthError::NotFound);
    }
    if self.rotate_refresh_tokens {
      self
        .refresh_token_table
        .revoke_subject(target)
        .await
        .map_err(AuthError::StoreUnavailable)?;
    }

    info!("[{}] Deactivated by {}", target.as_str(), actor.username());
    Ok(())
  }
}
