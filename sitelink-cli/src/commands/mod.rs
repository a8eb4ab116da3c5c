use rst_common::with_logging::log::info;

use crate::types::CliError;

pub mod connect_config;
pub mod credentials;
pub mod handler;
pub mod log;
pub mod migration;
pub mod plan;
pub mod random;
pub mod token;

/// `ensure_saved` turns a setter result into a command result
pub(crate) fn ensure_saved(saved: bool, field: &str) -> Result<(), CliError> {
    if !saved {
        return Err(CliError::StoreError(format!("unable to save {}", field)));
    }

    info!("[store] {} saved", field);
    Ok(())
}
