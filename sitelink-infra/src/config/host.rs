use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

/// `Host` is the `[host]` section describing the site this connection belongs to
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Host {
    #[serde(default)]
    pub(super) site_url: String,

    #[serde(default)]
    pub(super) platform_version: String,

    #[serde(default)]
    pub(super) runtime_version: String,

    #[serde(default)]
    pub(super) title: String,

    #[serde(default)]
    pub(super) icon: String,

    #[serde(default)]
    pub(super) current_user: Option<String>,

    #[serde(default)]
    pub(super) admin_users: Vec<String>,

    #[serde(default = "default_managed")]
    pub(super) managed: bool,
}

fn default_managed() -> bool {
    true
}

impl Host {
    pub fn site_url(&self) -> String {
        self.site_url.to_owned()
    }

    pub fn platform_version(&self) -> String {
        self.platform_version.to_owned()
    }

    pub fn runtime_version(&self) -> String {
        self.runtime_version.to_owned()
    }

    pub fn title(&self) -> String {
        self.title.to_owned()
    }

    pub fn icon(&self) -> String {
        self.icon.to_owned()
    }

    pub fn current_user(&self) -> Option<String> {
        self.current_user.to_owned()
    }

    pub fn admin_users(&self) -> Vec<String> {
        self.admin_users.to_owned()
    }

    pub fn managed(&self) -> bool {
        self.managed
    }
}

impl Default for Host {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            platform_version: String::new(),
            runtime_version: String::new(),
            title: String::new(),
            icon: String::new(),
            current_user: None,
            admin_users: Vec::new(),
            managed: default_managed(),
        }
    }
}

impl ToValidate for Host {
    fn validate(&self) -> Result<(), CommonError> {
        if self.admin_users.iter().any(|login| login.is_empty()) {
            return Err(CommonError::ValidationError(
                "config: host:admin_users contains an empty login".to_string(),
            ));
        }

        Ok(())
    }
}
