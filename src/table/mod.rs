mod refresh_table;
mod user_table;

use crate::{
  constants::{ADMIN_EMAIL, ADMIN_PASSWORD_VAR, ADMIN_USERNAME, DB_MAX_CONNECTIONS, PASSWORD_LEN},
  entity::{Email, Password, TryNewEntity, User, UserUpdate, Username},
  error::*,
  hasher::{generate_random_string, PasswordHasher},
  log::*,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{env, str::FromStr};

pub use refresh_table::{RefreshTokenRecord, SqliteRefreshTokenTable};
pub use user_table::SqliteUserTable;

#[derive(Debug, Clone, Copy)]
pub enum UserSearchKey<'a> {
  Username(&'a Username),
  Email(&'a Email),
}

/// User store consumed by the credential service.
#[async_trait]
pub trait UserTable: Send + Sync {
  /// Fails with `AddUserError::Duplicate` naming the column when username or email is taken.
  async fn add(&self, user: User) -> std::result::Result<(), AddUserError>;
  async fn find_user<'a>(&self, user_search_key: UserSearchKey<'a>) -> Result<Option<User>>;
  /// Last write wins. Returns false when no row matched the key.
  async fn update_user<'a>(&self, user_search_key: UserSearchKey<'a>, update: &UserUpdate) -> Result<bool>;
}

/// Ledger of unconsumed refresh token ids for single-use rotation.
#[async_trait]
pub trait RefreshTokenTable: Send + Sync {
  async fn add<'a>(&self, record: &'a RefreshTokenRecord) -> Result<()>;
  /// Removes an unexpired record and tells whether it was there.
  async fn consume(&self, jti: &str) -> Result<bool>;
  async fn revoke_subject<'a>(&self, subject: &'a Username) -> Result<u64>;
  async fn prune_expired(&self) -> Result<()>;

  async fn add_and_prune<'a>(&self, record: &'a RefreshTokenRecord) -> Result<()> {
    self.add(record).await?;
    self.prune_expired().await?;
    Ok(())
  }
}

/// Setup sqlite database with automatic creation of user and refresh token tables
pub async fn setup_sqlite(
  sqlite_url: &str,
  hasher: &dyn PasswordHasher,
) -> Result<(SqliteUserTable, SqliteRefreshTokenTable)> {
  let conn_opts = SqliteConnectOptions::from_str(sqlite_url)?.create_if_missing(true);
  // every connection to an in-memory database would otherwise see its own empty database
  let max_connections = if sqlite_url.contains(":memory:") {
    1
  } else {
    DB_MAX_CONNECTIONS
  };
  let pool = SqlitePoolOptions::default()
    .max_connections(max_connections)
    .connect_with(conn_opts)
    .await?;

  // Embed migrations into binary
  sqlx::migrate!("./migrations").run(&pool).await?;

  let user_table = SqliteUserTable::new(pool.clone());

  // Check existence of admin
  let admin_name = Username::new(ADMIN_USERNAME)?;
  let res = user_table.find_user(UserSearchKey::Username(&admin_name)).await?;
  if res.is_none() {
    warn!(
      r#"
-----------------------------------------------------------------------------------------------------------------------
No admin user exist in DB. So we generate the user of name "admin".
Unless ADMIN_PASSWORD was passed through an environment variable, the admin password is randomly generated.
Note the admin password is never automatically overridden by the environment variable if "admin" exists in user table.
If the admin password needs to be updated, call "admin" subcommand.
-----------------------------------------------------------------------------------------------------------------------
"#
    );

    let password = match env::var(ADMIN_PASSWORD_VAR) {
      Ok(p) => Password::new(p)?,
      Err(_) => {
        let random_pass = generate_random_string(PASSWORD_LEN);
        warn!(
          r#"
-----------------------------------------------------------------------------------------------------------------------
Password was automatically generated for the user of name "{}". Keep this securely.
{}
-----------------------------------------------------------------------------------------------------------------------
"#,
          ADMIN_USERNAME,
          random_pass.as_str()
        );
        Password::new(random_pass)?
      }
    };
    let user = User::new(&admin_name, &Email::new(ADMIN_EMAIL)?, hasher.hash(&password)?);
    user_table.add(user).await?;
  }

  let refresh_token_table = SqliteRefreshTokenTable::new(pool);

  Ok((user_table, refresh_token_table))
}
