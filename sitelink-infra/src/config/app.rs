use rst_common::standard::serde::{self, Deserialize};

use sitelink_core::connect::types::{DEFAULT_CREDENTIALS_KEY, DEFAULT_ERROR_LOG_KEY};

use crate::common::types::{CommonError, ToValidate};

/// `App` holds the store keys used by the credential record and the error log
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct App {
    #[serde(default = "default_credentials_key")]
    pub(super) credentials_key: String,

    #[serde(default = "default_error_log_key")]
    pub(super) error_log_key: String,
}

fn default_credentials_key() -> String {
    DEFAULT_CREDENTIALS_KEY.to_string()
}

fn default_error_log_key() -> String {
    DEFAULT_ERROR_LOG_KEY.to_string()
}

impl App {
    pub fn get_keys(&self) -> (String, String) {
        (self.credentials_key.to_owned(), self.error_log_key.to_owned())
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            credentials_key: default_credentials_key(),
            error_log_key: default_error_log_key(),
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        if self.credentials_key.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:credentials_key is missing".to_string(),
            ));
        }

        if self.error_log_key.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:error_log_key is missing".to_string(),
            ));
        }

        if self.credentials_key == self.error_log_key {
            return Err(CommonError::ValidationError(
                "config: app:credentials_key and app:error_log_key must differ".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;
    use std::path::PathBuf;

    use rstdev_config::format::use_toml;
    use rstdev_config::parser::from_file;
    use rstdev_config::{types::ConfigError, Builder};

    use crate::common::helpers;

    #[test]
    fn test_parse_app_config() -> Result<(), ConfigError> {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        let toml_file = format!("{}/config_app.toml", path.display());
        let config_toml = {
            let config_builder: Result<App, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        assert!(config_toml.is_ok());

        let (credentials_key, error_log_key) = config_toml.unwrap().get_keys();
        assert_eq!(credentials_key, "custom_api_options");
        assert_eq!(error_log_key, DEFAULT_ERROR_LOG_KEY);
        Ok(())
    }

    #[test]
    fn test_app_validation_failed() {
        let mut app = App::default();
        assert!(helpers::validate(app.clone()).is_ok());

        app.error_log_key = app.credentials_key.clone();
        let validation = helpers::validate(app.clone());
        assert!(validation.unwrap_err().to_string().contains("must differ"));

        app.credentials_key = "".to_string();
        let validation = helpers::validate(app);
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("app:credentials_key"));
    }
}
