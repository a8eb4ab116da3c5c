use sitelink_core::connect::types::HostEnvironmentBuilder;

use crate::config::Host;

/// `StaticHost` answers the host queries from the `[host]` configuration section
#[derive(Debug, Clone)]
pub struct StaticHost {
    config: Host,
}

impl StaticHost {
    pub fn new(config: Host) -> Self {
        Self { config }
    }
}

impl HostEnvironmentBuilder for StaticHost {
    fn site_url(&self) -> String {
        self.config.site_url()
    }

    fn platform_version(&self) -> String {
        self.config.platform_version()
    }

    fn runtime_version(&self) -> String {
        self.config.runtime_version()
    }

    fn site_title(&self) -> String {
        self.config.title()
    }

    fn site_icon(&self) -> String {
        self.config.icon()
    }

    fn current_admin_user(&self) -> Option<String> {
        let admins = self.config.admin_users();
        self.config
            .current_user()
            .filter(|login| admins.contains(login))
    }

    fn admin_users(&self) -> Vec<String> {
        self.config.admin_users()
    }

    fn is_managed(&self) -> bool {
        self.config.managed()
    }
}
