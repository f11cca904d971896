use super::{
  request::{Identity, ResetPasswordRequest},
  response::MessageResponse,
};
use crate::{error::*, state::AppState, table::UserSearchKey};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn reset_password(
  State(state): State<Arc<AppState>>,
  Json(input): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
  let identity = input.identity()?;
  let (current_password, new_password) = (input.current_password()?, input.new_password()?);

  let key = match &identity {
    Identity::Username(u) => UserSearchKey::Username(u),
    Identity::Email(e) => UserSearchKey::Email(e),
  };
  state.auth.reset_password(key, &current_password, &new_password).await?;

  Ok(Json(MessageResponse {
    message: "ok. password was reset.".to_string(),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    apis::test_state::app_state,
    entity::{Email, Password, TryNewEntity, Username},
  };

  #[tokio::test]
  async fn reset_by_username_and_unknown_email() {
    let state = app_state().await;
    let alice = Username::new("alice").unwrap();
    state
      .auth
      .register(&alice, &Email::new("alice@example.com").unwrap(), &Password::new("pw1").unwrap())
      .await
      .unwrap();

    let req: ResetPasswordRequest = serde_json::from_value(serde_json::json!({
      "username": "alice",
      "current_password": "pw1",
      "new_password": "pw2",
    }))
    .unwrap();
    assert!(reset_password(State(state.clone()), Json(req)).await.is_ok());
    assert!(state
      .auth
      .verify_credentials(&alice, &Password::new("pw2").unwrap())
      .await
      .is_ok());

    let req: ResetPasswordRequest = serde_json::from_value(serde_json::json!({
      "email": "carol@example.com",
      "current_password": "pw1",
      "new_password": "pw2",
    }))
    .unwrap();
    let res = reset_password(State(state), Json(req)).await;
    assert!(matches!(res, Err(AuthError::NotFound)));
  }
}
