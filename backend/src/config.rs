use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:loadsheet.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration, read once at startup from the environment
/// with compiled-in defaults for local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("LOADSHEET_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("LOADSHEET_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}
