use std::fs;
use std::path::Path;

use homedir::my_home;
use rst_common::with_logging::log::debug;

use crate::types::CliError;

pub fn setup_homedir(dir: &str) -> Result<String, CliError> {
    let current_homedir = my_home().map_err(|err| CliError::HomeDirError(err.to_string()))?;

    match current_homedir {
        Some(current_dir) => {
            let sitelink_dir = current_dir.join(dir);
            let sitelink_path = Path::new(&sitelink_dir);

            if !sitelink_path.exists() {
                debug!("[homedir:setup] sitelink directory still not exists");
                fs::create_dir_all(sitelink_path)
                    .map_err(|err| CliError::HomeDirError(err.to_string()))?;
            }

            debug!("[homedir:setup] sitelink home directory: {}", sitelink_path.display());
            Ok(sitelink_path.display().to_string())
        }
        None => Err(CliError::HomeDirError(
            "unknown home directory path".to_string(),
        )),
    }
}
