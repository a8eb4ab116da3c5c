use rst_common::with_errors::thiserror::{self, Error};

pub const SITELINK_DEFAULT_DIR: &str = ".sitelink";
pub const SITELINK_DATA_DIR: &str = "data";
pub const SITELINK_CONFIG_FILE: &str = "config.toml";
pub const SITELINK_CF_NAME: &str = "settings";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("homedir error: {0}")]
    HomeDirError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("token error: {0}")]
    TokenError(String),

    #[error("output error: {0}")]
    OutputError(String),
}
