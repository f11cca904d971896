use super::{UserSearchKey, UserTable};
use crate::{constants::*, entity::*, error::*};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use std::convert::TryFrom;

#[derive(Debug, Clone)]
pub struct SqliteUserTable {
  pool: SqlitePool,
}

impl SqliteUserTable {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

fn key_column(user_search_key: &UserSearchKey<'_>) -> (&'static str, String) {
  match user_search_key {
    UserSearchKey::Username(username) => ("username", username.as_str().to_string()),
    UserSearchKey::Email(email) => ("email", email.as_str().to_string()),
  }
}

#[async_trait]
impl UserTable for SqliteUserTable {
  async fn add(&self, user: User) -> std::result::Result<(), AddUserError> {
    let sql = format!(
      "insert into {} (id, username, email, encoded_hash, is_active, is_admin, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
      USER_TABLE_NAME
    );
    let res = sqlx::query(&sql)
      .bind(user.id.as_str())
      .bind(user.username.as_str())
      .bind(user.email.as_str())
      .bind(user.encoded_hash.as_str())
      .bind(user.is_active)
      .bind(user.is_admin)
      .bind(user.created_at)
      .execute(&self.pool)
      .await;
    match res {
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(SQLITE_CONSTRAINT_UNIQUE) => {
        let column = if e.message().contains("email") { "email" } else { "username" };
        Err(AddUserError::Duplicate(column))
      }
      Err(e) => Err(AddUserError::Store(e.into())),
    }
  }

  async fn find_user<'a>(&self, user_search_key: UserSearchKey<'a>) -> Result<Option<User>> {
    let (column, value) = key_column(&user_search_key);
    let sql = format!("select * from {} where {}=?", USER_TABLE_NAME, column);
    let user_row_opt: Option<UserRow> = sqlx::query_as(&sql).bind(value).fetch_optional(&self.pool).await?;
    match user_row_opt {
      Some(user_row) => Ok(Some(User::try_from(user_row)?)),
      None => Ok(None),
    }
  }

  async fn update_user<'a>(&self, user_search_key: UserSearchKey<'a>, update: &UserUpdate) -> Result<bool> {
    update.ensure_not_empty()?;
    let (column, value) = key_column(&user_search_key);

    let mut assignments = vec![];
    if update.encoded_hash.is_some() {
      assignments.push("encoded_hash=?");
    }
    if update.is_active.is_some() {
      assignments.push("is_active=?");
    }
    let sql = format!(
      "update {} set {} where {}=?",
      USER_TABLE_NAME,
      assignments.join(", "),
      column
    );

    let mut query = sqlx::query(&sql);
    if let Some(encoded_hash) = &update.encoded_hash {
      query = query.bind(encoded_hash.as_str());
    }
    if let Some(is_active) = update.is_active {
      query = query.bind(is_active);
    }
    let res = query.bind(value).execute(&self.pool).await?;
    Ok(res.rows_affected() > 0)
  }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: String,
  username: String,
  email: String,
  encoded_hash: String,
  is_active: bool,
  is_admin: bool,
  created_at: i64,
}

impl TryFrom<UserRow> for User {
  type Error = crate::error::Error;

  fn try_from(row: UserRow) -> std::result::Result<Self, Self::Error> {
    Ok(User {
      id: row.id,
      username: Username::new(row.username)?,
      email: Email::new(row.email)?,
      encoded_hash: EncodedHash::new(row.encoded_hash)?,
      is_active: row.is_active,
      is_admin: row.is_admin,
      created_at: row.created_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{hasher::Argon2Hasher, table::setup_sqlite};

  fn user(name: &str) -> User {
    User::new(
      &Username::new(name).unwrap(),
      &Email::new(format!("{name}@example.com")).unwrap(),
      EncodedHash::new("$argon2id$v=19$m=4096,t=3,p=4$c2FsdA$aGFzaA").unwrap(),
    )
  }

  #[tokio::test]
  async fn add_and_find_by_username_and_email() {
    let (table, _) = setup_sqlite("sqlite::memory:", &Argon2Hasher).await.unwrap();
    table.add(user("alice")).await.unwrap();

    let username = Username::new("alice").unwrap();
    let by_name = table.find_user(UserSearchKey::Username(&username)).await.unwrap();
    assert_eq!(by_name.unwrap().email(), "alice@example.com");

    let email = Email::new("alice@example.com").unwrap();
    let by_email = table.find_user(UserSearchKey::Email(&email)).await.unwrap();
    assert_eq!(by_email.unwrap().username(), "alice");

    let nobody = Username::new("nobody").unwrap();
    assert!(table.find_user(UserSearchKey::Username(&nobody)).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn admin_is_bootstrapped() {
    let (table, _) = setup_sqlite("sqlite::memory:", &Argon2Hasher).await.unwrap();
    let admin = Username::new(ADMIN_USERNAME).unwrap();
    let found = table.find_user(UserSearchKey::Username(&admin)).await.unwrap().unwrap();
    assert!(found.is_admin());
    assert!(found.is_active());
  }

  #[tokio::test]
  async fn duplicate_username_and_email_are_told_apart() {
    let (table, _) = setup_sqlite("sqlite::memory:", &Argon2Hasher).await.unwrap();
    table.add(user("alice")).await.unwrap();
    assert!(matches!(
      table.add(user("alice")).await,
      Err(AddUserError::Duplicate("username"))
    ));

    let same_email = User::new(
      &Username::new("alice2").unwrap(),
      &Email::new("alice@example.com").unwrap(),
      EncodedHash::new("$argon2id$v=19$m=4096,t=3,p=4$c2FsdA$aGFzaA").unwrap(),
    );
    assert!(matches!(
      table.add(same_email).await,
      Err(AddUserError::Duplicate("email"))
    ));
  }

  #[tokio::test]
  async fn update_changes_only_given_columns() {
    let (table, _) = setup_sqlite("sqlite::memory:", &Argon2Hasher).await.unwrap();
    table.add(user("alice")).await.unwrap();
    let username = Username::new("alice").unwrap();

    let new_hash = EncodedHash::new("$argon2id$v=19$m=4096,t=3,p=4$bmV3$bmV3").unwrap();
    let updated = table
      .update_user(UserSearchKey::Username(&username), &UserUpdate::password(new_hash))
      .await
      .unwrap();
    assert!(updated);
    let found = table.find_user(UserSearchKey::Username(&username)).await.unwrap().unwrap();
    assert_eq!(found.encoded_hash().as_str(), "$argon2id$v=19$m=4096,t=3,p=4$bmV3$bmV3");
    assert!(found.is_active());

    table
      .update_user(UserSearchKey::Username(&username), &UserUpdate::deactivate())
      .await
      .unwrap();
    let found = table.find_user(UserSearchKey::Username(&username)).await.unwrap().unwrap();
    assert!(!found.is_active());
    assert_eq!(found.encoded_hash().as_str(), "$argon2id$v=19$m=4096,t=3,p=4$bmV3$bmV3");
  }

  #[tokio::test]
  async fn update_of_missing_user_reports_no_match() {
    let (table, _) = setup_sqlite("sqlite::memory:", &Argon2Hasher).await.unwrap();
    let username = Username::new("ghost").unwrap();
    let updated = table
      .update_user(UserSearchKey::Username(&username), &UserUpdate::deactivate())
      .await
      .unwrap();
    assert!(!updated);
    assert!(table
      .update_user(UserSearchKey::Username(&username), &UserUpdate::default())
      .await
      .is_err());
  }
}
