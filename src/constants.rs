use argon2::{Config, ThreadMode, Variant, Version};

pub const THREAD_NAME: &str = "subscription_auth_server";

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default admin name that will be written to the database.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@localhost.localdomain";
/// Default environment variable of admin password
pub const ADMIN_PASSWORD_VAR: &str = "ADMIN_PASSWORD";
/// Default password length when random password is needed at the user creation.
pub const PASSWORD_LEN: usize = 32;

// Database settings
pub const DB_FILE_PATH: &str = "./users.db";
pub const DB_MAX_CONNECTIONS: u32 = 8;
pub const USER_TABLE_NAME: &str = "users";
pub const REFRESH_TOKEN_TABLE_NAME: &str = "refresh_tokens";
/// SQLite extended result code of a UNIQUE constraint violation
pub const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

// Argon2 password hashing params
pub const ARGON2_CONFIG: Config = Config {
  variant: Variant::Argon2id,
  version: Version::Version13,
  mem_cost: 4096,
  time_cost: 3,
  lanes: 4,
  thread_mode: ThreadMode::Sequential,
  secret: &[],
  ad: &[],
  hash_length: 32,
};
pub const ARGON2_SALT_LEN: usize = 32;

// Token settings
/// Environment variable holding the base64 encoded signing secret
pub const SIGNING_SECRET_VAR: &str = "SIGNING_SECRET";
/// Shortest accepted signing secret in bytes after base64 decoding
pub const MIN_SIGNING_SECRET_LEN: usize = 32;
/// Length of secrets printed by the `gen-secret` subcommand
pub const GENERATED_SECRET_LEN: usize = 64;
pub const DEFAULT_ALGORITHM: &str = "HS256";
pub const DEFAULT_ACCESS_TOKEN_TTL_MINS: &str = "30";
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: &str = "7";
/// Allowed clock skew when checking exp/nbf
pub const TOKEN_TIME_TOLERANCE_SECS: u64 = 60;
pub const TOKEN_ID_LEN: usize = 32;
pub const TOKEN_TYPE: &str = "bearer";
