use super::{ClapSubCommand, SigningSecret};
use crate::error::*;
use async_trait::async_trait;
use clap::{ArgMatches, Command};

pub(super) struct GenSecret {}

#[async_trait]
impl ClapSubCommand for GenSecret {
  fn subcmd() -> Command {
    Command::new("gen-secret").about("Print a random base64 signing secret usable as SIGNING_SECRET")
  }

  async fn exec_matches(_sub_m: &ArgMatches) -> Result<Option<crate::AppState>> {
    println!("{}", SigningSecret::generate_base64());
    Ok(None)
  }
}
