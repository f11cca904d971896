use super::response::ProfileResponse;
use crate::{error::*, state::AppState};
use axum::{
  extract::State,
  headers::{authorization::Bearer, Authorization},
  Json, TypedHeader,
};
use std::sync::Arc;

pub async fn me(
  State(state): State<Arc<AppState>>,
  bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<ProfileResponse>, AuthError> {
  let Some(TypedHeader(Authorization(bearer))) = bearer else {
    return Err(AuthError::MissingToken);
  };
  let user = state.auth.current_user(bearer.token()).await?;
  Ok(Json(ProfileResponse::from(&user)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    apis::test_state::app_state,
    constants::ADMIN_USERNAME,
    entity::{TryNewEntity, Username},
  };

  #[tokio::test]
  async fn me_returns_profile_of_bearer() {
    let state = app_state().await;
    let token = state
      .auth
      .issue_access_token(&Username::new(ADMIN_USERNAME).unwrap())
      .unwrap();

    let bearer = Authorization::bearer(&token).unwrap();
    let Json(profile) = me(State(state.clone()), Some(TypedHeader(bearer))).await.unwrap();
    assert_eq!(profile.username, ADMIN_USERNAME);
    assert!(profile.is_active);
    assert!(profile.is_admin);

    assert!(matches!(me(State(state), None).await, Err(AuthError::MissingToken)));
  }
}
