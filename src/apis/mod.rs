mod deactivate;
mod error;
mod health_check;
mod login;
mod me;
mod refresh;
mod register;
mod request;
mod reset_password;
mod response;

pub use deactivate::deactivate;
pub use health_check::health_check;
pub use login::login;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use reset_password::reset_password;
