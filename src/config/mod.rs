mod parse_opts;
mod subcmd_admin;
mod subcmd_run;
mod subcmd_secret;
mod token_config;

use crate::error::Result;
use async_trait::async_trait;

pub use parse_opts::parse_opts;
pub use token_config::{SigningSecret, TokenConfig};

#[async_trait]
trait ClapSubCommand {
  fn subcmd() -> clap::Command;

  async fn exec_matches(sub_m: &clap::ArgMatches) -> Result<Option<crate::AppState>>;
}

/// Value parser for lifetimes given in whole minutes or days.
pub(crate) fn verify_positive_int(arg_val: &str) -> Result<u64, String> {
  match arg_val.parse::<u64>() {
    Ok(0) => Err("Must be greater than zero".to_string()),
    Ok(v) => Ok(v),
    Err(_) => Err(format!("Could not parse \"{}\" as a positive integer.", arg_val)),
  }
}
