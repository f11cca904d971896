mod apis;
mod auth;
mod config;
mod constants;
mod entity;
mod error;
mod hasher;
mod jwt;
mod log;
mod state;
mod table;

use crate::{
  apis::{deactivate, health_check, login, me, refresh, register, reset_password},
  constants::*,
  error::*,
  log::*,
  state::AppState,
};
use axum::{
  routing::{delete, get, post},
  Router, Server,
};
use config::parse_opts;
use std::sync::Arc;
use tokio::runtime::Builder;

fn main() -> Result<()> {
  init_logger();

  let mut runtime_builder = Builder::new_multi_thread();
  runtime_builder.enable_all();
  runtime_builder.thread_name(THREAD_NAME);
  let runtime = runtime_builder.build()?;

  runtime.block_on(async { serve(parse_opts().await).await })
}

/// Runs the server for `run`. Other subcommands have already finished. Failures surface as a non-zero exit.
async fn serve(parsed: Result<Option<AppState>>) -> Result<()> {
  match parsed {
    Ok(Some(shared_state)) => define_route(Arc::new(shared_state)).await,
    Ok(None) => {
      debug!("Subcommand finished without starting the server");
      Ok(())
    }
    Err(e) => {
      error!("{e}");
      Err(e)
    }
  }
}

async fn define_route(shared_state: Arc<AppState>) -> Result<()> {
  let addr = shared_state.listen_socket;

  // routes nested under /v1.0/users
  let user_routes = Router::new()
    .route("/register", post(register))
    .route("/login", post(login))
    .route("/token/refresh", post(refresh))
    .route("/reset-password", post(reset_password))
    .route("/deactivate/:username", delete(deactivate))
    .route("/me", get(me))
    .with_state(shared_state);

  let router = Router::new()
    .route("/health", get(health_check))
    .nest("/v1.0/users", user_routes);

  info!("Listening on {}", &addr);
  let server = Server::try_bind(&addr)?.serve(router.into_make_service());

  if let Err(e) = server.await {
    error!("Server is down!: {e}");
    return Err(e.into());
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn startup_failure_is_returned() {
    assert!(serve(Err(anyhow!("Signing secret must be given"))).await.is_err());
  }

  #[tokio::test]
  async fn finished_subcommand_is_success() {
    assert!(serve(Ok(None)).await.is_ok());
  }

  #[tokio::test]
  async fn taken_port_is_an_error() {
    let mut shared_state = crate::apis::test_state::app_state().await;
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let taken = listener.local_addr().unwrap();
    Arc::get_mut(&mut shared_state).unwrap().listen_socket = taken;

    assert!(define_route(shared_state).await.is_err());
  }
}
