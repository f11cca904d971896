use super::{verify_positive_int, ClapSubCommand, SigningSecret, TokenConfig};
use crate::{
  auth::AuthService,
  constants::{
    DB_FILE_PATH, DEFAULT_ACCESS_TOKEN_TTL_MINS, DEFAULT_ADDRESS, DEFAULT_ALGORITHM, DEFAULT_PORT,
    DEFAULT_REFRESH_TOKEN_TTL_DAYS, SIGNING_SECRET_VAR,
  },
  error::*,
  hasher::Argon2Hasher,
  jwt::Algorithm,
  log::*,
  state::AppState,
  table::setup_sqlite,
};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use std::{env, fs, net::SocketAddr, str::FromStr, sync::Arc};

pub(super) struct Run {}

#[async_trait]
impl ClapSubCommand for Run {
  fn subcmd() -> Command {
    Command::new("run")
      .about("Start the credential and token server")
      .arg(
        Arg::new("listen_address")
          .short('l')
          .long("listen-address")
          .value_name("ADDRESS")
          .default_value(DEFAULT_ADDRESS)
          .help("Listen address"),
      )
      .arg(
        Arg::new("port")
          .short('p')
          .long("port")
          .value_name("PORT")
          .default_value(DEFAULT_PORT)
          .help("Listen port"),
      )
      .arg(
        Arg::new("signing_secret_path")
          .short('s')
          .long("signing-secret-path")
          .value_name("PATH")
          .help("File holding the base64 encoded signing secret. SIGNING_SECRET environment variable is read if omitted"),
      )
      .arg(
        Arg::new("signing_algorithm")
          .short('a')
          .long("signing-algorithm")
          .value_name("ALGORITHM")
          .default_value(DEFAULT_ALGORITHM)
          .help("Signing algorithm of JWT, one of \"HS256\", \"HS384\" or \"HS512\""),
      )
      .arg(
        Arg::new("access_token_ttl_mins")
          .long("access-token-ttl-mins")
          .value_name("MINUTES")
          .value_parser(verify_positive_int)
          .default_value(DEFAULT_ACCESS_TOKEN_TTL_MINS)
          .help("Lifetime of access tokens in minutes"),
      )
      .arg(
        Arg::new("refresh_token_ttl_days")
          .long("refresh-token-ttl-days")
          .value_name("DAYS")
          .value_parser(verify_positive_int)
          .default_value(DEFAULT_REFRESH_TOKEN_TTL_DAYS)
          .help("Lifetime of refresh tokens in days"),
      )
      .arg(
        Arg::new("rotate_refresh_tokens")
          .short('r')
          .long("rotate-refresh-tokens")
          .action(clap::ArgAction::SetTrue)
          .help("Make refresh tokens single use and issue a new one on every refresh"),
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
    let Some(address) = sub_m.get_one::<String>("listen_address") else {
      bail!("Listen address must be specified");
    };
    let Some(port) = sub_m.get_one::<String>("port") else {
      bail!("Port must be specified");
    };
    let listen_socket = format!("{}:{}", address, port).parse::<SocketAddr>()?;

    let algorithm: Algorithm = match sub_m.get_one::<String>("signing_algorithm") {
      Some(a) => match Algorithm::from_str(a) {
        Ok(ao) => ao,
        Err(_) => {
          bail!("Given algorithm not supported");
        }
      },
      None => {
        bail!("Algorithm must be specified");
      }
    };

    let secret = read_signing_secret(sub_m.get_one::<String>("signing_secret_path"))?;

    let (Some(access_ttl), Some(refresh_ttl)) = (
      sub_m.get_one::<u64>("access_token_ttl_mins"),
      sub_m.get_one::<u64>("refresh_token_ttl_days"),
    ) else {
      bail!("Token lifetimes must be specified");
    };
    let rotate = sub_m.get_flag("rotate_refresh_tokens");
    let token_config = TokenConfig::new(algorithm, secret, *access_ttl, *refresh_ttl)?.with_rotation(rotate);

    let Some(db_file_path) = sub_m.get_one::<String>("db_file_path") else {
      bail!("Database path must be specified");
    };

    let hasher = Arc::new(Argon2Hasher);
    let (user_table, refresh_token_table) = setup_sqlite(&format!("sqlite:{}", db_file_path), hasher.as_ref()).await?;

    info!(
      "Signing with {}, access token valid for {} min, refresh token valid for {} days, rotation {}",
      algorithm.as_str(),
      access_ttl,
      refresh_ttl,
      if rotate { "enabled" } else { "disabled" }
    );

    let auth = AuthService::new(
      &token_config,
      Arc::new(user_table),
      Arc::new(refresh_token_table),
      hasher,
    )?;

    Ok(Some(AppState { listen_socket, auth }))
  }
}

/// The file wins over the environment. Neither present is an error.
fn read_signing_secret(path: Option<&String>) -> Result<SigningSecret> {
  match path {
    Some(p) => {
      let Ok(content) = fs::read_to_string(p) else {
        bail!("Failed to read signing secret file");
      };
      SigningSecret::from_base64(&content)
    }
    None => {
      let Ok(content) = env::var(SIGNING_SECRET_VAR) else {
        bail!("Signing secret must be given by --signing-secret-path or {SIGNING_SECRET_VAR}");
      };
      SigningSecret::from_base64(&content)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn secret_is_read_from_file() {
    let encoded = SigningSecret::generate_base64();
    let path = env::temp_dir().join(format!("signing_secret_{}", uuid::Uuid::new_v4()));
    fs::write(&path, format!("{encoded}\n")).unwrap();

    let secret = read_signing_secret(Some(&path.to_string_lossy().to_string())).unwrap();
    assert_eq!(secret.as_bytes().len(), crate::constants::GENERATED_SECRET_LEN);

    fs::remove_file(&path).unwrap();
  }

  #[test]
  fn missing_secret_file_fails() {
    let missing = "/nonexistent/signing_secret".to_string();
    assert!(read_signing_secret(Some(&missing)).is_err());
  }

  #[test]
  fn run_args_are_parsed() {
    let matches = Run::subcmd()
      .try_get_matches_from(["run", "--port", "8080", "--access-token-ttl-mins", "5", "-r"])
      .unwrap();
    assert_eq!(matches.get_one::<String>("port").map(String::as_str), Some("8080"));
    assert_eq!(matches.get_one::<u64>("access_token_ttl_mins"), Some(&5));
    assert_eq!(matches.get_one::<u64>("refresh_token_ttl_days"), Some(&7));
    assert!(matches.get_flag("rotate_refresh_tokens"));
  }

  #[test]
  fn zero_ttl_is_rejected_by_parser() {
    assert!(Run::subcmd()
      .try_get_matches_from(["run", "--refresh-token-ttl-days", "0"])
      .is_err());
  }
}
