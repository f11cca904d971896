use super::{subcmd_admin::Admin, subcmd_run::Run, subcmd_secret::GenSecret, ClapSubCommand};
use crate::{error::*, state::AppState};
use clap::command;

pub async fn parse_opts() -> Result<Option<AppState>> {
  let _ = include_str!("../../Cargo.toml");

  let options = command!()
    .subcommand_required(true)
    .subcommand(Run::subcmd())
    .subcommand(Admin::subcmd())
    .subcommand(GenSecret::subcmd());

  let matches = options.get_matches();

  match matches.subcommand() {
    Some(("run", sub_m)) => Run::exec_matches(sub_m).await,
    Some(("admin", sub_m)) => Admin::exec_matches(sub_m).await,
    Some(("gen-secret", sub_m)) => GenSecret::exec_matches(sub_m).await,
    _ => {
      bail!("Unknown subcommand");
    }
  }
}
