use crate::{error::AuthError, log::*};
use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

impl AuthError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::MissingToken => {
        StatusCode::UNAUTHORIZED
      }
      AuthError::NotFound => StatusCode::NOT_FOUND,
      AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
      AuthError::Conflict(_) => StatusCode::CONFLICT,
      AuthError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AuthError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    // details of server side failures stay in the log
    let error_message = match &self {
      AuthError::StoreUnavailable(e) => {
        error!("User store failure: {e:#}");
        "Service temporarily unavailable".to_string()
      }
      AuthError::Internal(e) => {
        error!("Internal failure: {e:#}");
        "Something failed in authentication".to_string()
      }
      _ => self.to_string(),
    };
    let body = Json(json!({
        "error": error_message,
    }));
    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::anyhow;

  #[test]
  fn errors_map_to_status_codes() {
    let cases = [
      (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
      (AuthError::TokenInvalid, StatusCode::UNAUTHORIZED),
      (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
      (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
      (AuthError::NotFound, StatusCode::NOT_FOUND),
      (AuthError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
      (AuthError::Conflict("taken".to_string()), StatusCode::CONFLICT),
      (AuthError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
      (AuthError::StoreUnavailable(anyhow!("down")), StatusCode::SERVICE_UNAVAILABLE),
      (AuthError::Internal(anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
      assert_eq!(err.into_response().status(), status);
    }
  }
}
