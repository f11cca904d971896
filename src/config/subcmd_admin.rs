use super::ClapSubCommand;
use crate::{
  constants::{ADMIN_USERNAME, DB_FILE_PATH},
  entity::{Password, TryNewEntity, UserUpdate, Username},
  error::*,
  hasher::{Argon2Hasher, PasswordHasher},
  log::*,
  table::{setup_sqlite, UserSearchKey, UserTable},
};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

pub(super) struct Admin {}

#[async_trait]
impl ClapSubCommand for Admin {
  fn subcmd() -> Command {
    Command::new("admin")
      .about("Update the password of the built-in admin user")
      .arg(
        Arg::new("admin_password")
          .short('p')
          .long("admin-password")
          .value_name("PASSWORD")
          .required(true)
          .help("New admin password"),
      )
      .arg(
        Arg::new("db_file_path")
          .short('d')
          .long("db-file-path")
          .value_name("PATH")
          .default_value(DB_FILE_PATH)
          .help("SQLite database file path"),
      )
  }

  async fn exec_matches(sub_m: &ArgMatches) -> Result<Option<crate::AppState>> {
    let Some(db_file_path) = sub_m.get_one::<String>("db_file_path") else {
      bail!("Database path must be specified");
    };
    let Some(admin_password) = sub_m.get_one::<String>("admin_password") else {
      bail!("Admin password must be specified");
    };
    let password = Password::new(admin_password)?;

    let hasher = Argon2Hasher;
    let (user_table, _) = setup_sqlite(&format!("sqlite:{}", db_file_path), &hasher).await?;

    let admin_name = Username::new(ADMIN_USERNAME)?;
    let updated = user_table
      .update_user(
        UserSearchKey::Username(&admin_name),
        &UserUpdate::password(hasher.hash(&password)?),
      )
      .await?;
    ensure!(updated, "Admin user is missing in the database");

    info!("Updated the password of \"{}\"", ADMIN_USERNAME);
    Ok(None)
  }
}
