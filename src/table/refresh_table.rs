use super::RefreshTokenTable;
use crate::{
  constants::*,
  entity::{Entity, Username},
  error::*,
};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Issued and not yet consumed refresh token.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
  pub jti: String,
  pub subject: Username,
  /// unix seconds
  pub expires: i64,
}

#[derive(Debug, Clone)]
pub struct SqliteRefreshTokenTable {
  pool: SqlitePool,
}

impl SqliteRefreshTokenTable {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl RefreshTokenTable for SqliteRefreshTokenTable {
  async fn add<'a>(&self, record: &'a RefreshTokenRecord) -> Result<()> {
    let sql = format!(
      "insert into {} (jti, subject, expires) VALUES (?, ?, ?)",
      REFRESH_TOKEN_TABLE_NAME
    );
    let _res = sqlx::query(&sql)
      .bind(record.jti.as_str())
      .bind(record.subject.as_str())
      .bind(record.expires)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn consume(&self, jti: &str) -> Result<bool> {
    let current = chrono::Utc::now().timestamp();
    let sql = format!("delete from {} where jti=? and expires>?", REFRESH_TOKEN_TABLE_NAME);
    let res = sqlx::query(&sql).bind(jti).bind(current).execute(&self.pool).await?;
    Ok(res.rows_affected() > 0)
  }

  async fn revoke_subject<'a>(&self, subject: &'a Username) -> Result<u64> {
    let sql = format!("delete from {} where subject=?", REFRESH_TOKEN_TABLE_NAME);
    let res = sqlx::query(&sql).bind(subject.as_str()).execute(&self.pool).await?;
    Ok(res.rows_affected())
  }

  async fn prune_expired(&self) -> Result<()> {
    let current = chrono::Utc::now().timestamp();
    let sql = format!("delete from {} where expires <= ?", REFRESH_TOKEN_TABLE_NAME);
    let _res = sqlx::query(&sql).bind(current).execute(&self.pool).await?;
    Ok(())
  }
}
