use super::request::LoginRequest;
use crate::{auth::TokenPair, error::*, state::AppState};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn login(
  State(state): State<Arc<AppState>>,
  Json(input): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
  // malformed credentials are indistinguishable from wrong ones
  let (Ok(username), Ok(password)) = (input.username(), input.password()) else {
    return Err(AuthError::InvalidCredentials);
  };

  let pair = state.auth.login(&username, &password).await?;
  Ok(Json(pair))
}
