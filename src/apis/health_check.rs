use crate::log::*;

pub async fn health_check() -> &'static str {
  debug!("health_check invoked");
  "Works at least as a server. Not checked if APIs work well."
}
