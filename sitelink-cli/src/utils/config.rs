use std::path::Path;

use rst_common::with_logging::log::{debug, info};

use sitelink_infra::config::{Config, Database, Parser, RocksDBCommon};

use crate::types::{CliError, SITELINK_CF_NAME, SITELINK_CONFIG_FILE, SITELINK_DATA_DIR};

/// `load_config` resolves the configuration used by every command
///
/// An explicit file must exist. Without one, `config.toml` inside the sitelink home directory
/// is used when present, else the defaults with the database stored in that same directory
pub fn load_config(config_file: Option<String>, sitelink_dir: &str) -> Result<Config, CliError> {
    if let Some(file) = config_file {
        debug!("[config:load] explicit config file: {}", file);
        return parse_file(file);
    }

    let default_file = Path::new(sitelink_dir).join(SITELINK_CONFIG_FILE);
    if default_file.exists() {
        debug!("[config:load] home config file: {}", default_file.display());
        return parse_file(default_file.display().to_string());
    }

    info!("[config:load] no config file found, using defaults");
    Ok(default_config(sitelink_dir))
}

pub fn default_config(sitelink_dir: &str) -> Config {
    let data_dir = Path::new(sitelink_dir).join(SITELINK_DATA_DIR);
    let database = Database::new(RocksDBCommon::new(
        data_dir.display().to_string(),
        SITELINK_CF_NAME.to_string(),
    ));

    Config::default().with_database(database)
}

fn parse_file(file: String) -> Result<Config, CliError> {
    Parser::new(file)
        .parse()
        .map_err(|err| CliError::ConfigError(err.to_string()))
}
