use rst_common::with_logging::log::debug;

use sitelink_infra::Services;

pub struct ContextHandler {
    services: Services,
}

impl ContextHandler {
    pub fn new(services: Services) -> Self {
        debug!("[ctx:new] services ready");
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }
}
