use super::request::RefreshRequest;
use crate::{auth::TokenPair, error::*, log::*, state::AppState};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn refresh(
  State(state): State<Arc<AppState>>,
  Json(input): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AuthError> {
  let pair = state.auth.refresh_access_token(&input.refresh_token).await?;
  debug!("ok. access token is refreshed.");
  Ok(Json(pair))
}
