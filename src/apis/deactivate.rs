use super::response::MessageResponse;
use crate::{
  entity::{TryNewEntity, Username},
  error::*,
  state::AppState,
};
use axum::{
  extract::{Path, State},
  headers::{authorization::Bearer, Authorization},
  Json, TypedHeader,
};
use std::sync::Arc;

pub async fn deactivate(
  State(state): State<Arc<AppState>>,
  Path(username): Path<String>,
  bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<MessageResponse>, AuthError> {
  let Some(TypedHeader(Authorization(bearer))) = bearer else {
    return Err(AuthError::MissingToken);
  };
  let Ok(target) = Username::new(&username) else {
    return Err(AuthError::InvalidRequest("invalid username".to_string()));
  };

  state.auth.deactivate(bearer.token(), &target).await?;

  Ok(Json(MessageResponse {
    message: "ok. deactivated the user.".to_string(),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    apis::test_state::app_state,
    entity::{Email, Password},
  };

  #[tokio::test]
  async fn user_deactivates_self_but_not_others() {
    let state = app_state().await;
    for name in ["alice", "bob"] {
      state
        .auth
        .register(
          &Username::new(name).unwrap(),
          &Email::new(format!("{name}@example.com")).unwrap(),
          &Password::new("pw").unwrap(),
        )
        .await
        .unwrap();
    }
    let token = state.auth.issue_access_token(&Username::new("alice").unwrap()).unwrap();
    let bearer = || Some(TypedHeader(Authorization::bearer(&token).unwrap()));

    let res = deactivate(State(state.clone()), Path("bob".to_string()), bearer()).await;
    assert!(matches!(res, Err(AuthError::Forbidden(_))));

    let res = deactivate(State(state.clone()), Path("alice".to_string()), bearer()).await;
    assert!(res.is_ok());

    // the token outlives the account but no longer resolves to an active user
    let res = deactivate(State(state.clone()), Path("alice".to_string()), bearer()).await;
    assert!(matches!(res, Err(AuthError::TokenInvalid)));

    let res = deactivate(State(state), Path("alice".to_string()), None).await;
    assert!(matches!(res, Err(AuthError::MissingToken)));
  }
}
