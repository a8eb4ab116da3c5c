use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `Remote` is the `[remote]` section, used to reach the remote management API
///
/// An empty `base_url` is allowed, the `api_url` stored in the credential record is used instead
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Remote {
    #[serde(default)]
    pub(super) base_url: String,

    #[serde(default)]
    pub(super) api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub(super) timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Remote {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.to_owned()
    }

    pub fn api_key(&self) -> String {
        self.api_key.to_owned()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Remote {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ToValidate for Remote {
    fn validate(&self) -> Result<(), CommonError> {
        if !self.base_url.is_empty()
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(CommonError::ValidationError(
                "config: remote:base_url must be an http(s) url".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: remote:timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use table_test::table_test;

    use crate::common::helpers;

    #[test]
    fn test_remote_validation() {
        let table = vec![
            (("", 30), true),
            (("https://api.example.org/v1", 30), true),
            (("http://localhost:8080", 1), true),
            (("ftp://example.org", 30), false),
            (("https://api.example.org", 0), false),
        ];

        for (validator, input, expected) in table_test!(table) {
            let (base_url, timeout_secs) = input;
            let remote = Remote::new(base_url.to_string(), "".to_string(), timeout_secs);

            validator
                .given(&format!("{:?}", input))
                .when("validate remote config")
                .then(&format!("valid: {}", expected))
                .assert_eq(expected, helpers::validate(remote).is_ok());
        }
    }

    #[test]
    fn test_remote_timeout() {
        assert_eq!(Remote::default().timeout(), Duration::from_secs(30));
    }
}
