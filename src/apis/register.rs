use super::{request::RegisterRequest, response::MessageResponse};
use crate::{error::*, state::AppState};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn register(
  State(state): State<Arc<AppState>>,
  Json(input): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
  let (username, email, password) = (input.username()?, input.email()?, input.password()?);

  state.auth.register(&username, &email, &password).await?;

  Ok(Json(MessageResponse {
    message: "ok. created the user.".to_string(),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::apis::test_state::app_state;

  fn request(username: &str, email: &str) -> RegisterRequest {
    serde_json::from_value(serde_json::json!({
      "username": username,
      "email": email,
      "password": "pw1",
    }))
    .unwrap()
  }

  #[tokio::test]
  async fn register_then_conflict() {
    let state = app_state().await;
    let res = register(State(state.clone()), Json(request("alice", "alice@example.com"))).await;
    assert!(res.is_ok());

    let res = register(State(state), Json(request("alice", "other@example.com"))).await;
    assert!(matches!(res, Err(AuthError::Conflict(_))));
  }

  #[tokio::test]
  async fn malformed_email_is_bad_request() {
    let state = app_state().await;
    let res = register(State(state), Json(request("alice", "not-an-email"))).await;
    assert!(matches!(res, Err(AuthError::InvalidRequest(_))));
  }
}
