use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use rst_common::standard::serde_json::{Map, Value};

use super::types::HostEnvironmentBuilder;

/// `ConfigOverride` adjusts the payload built by [`build_connect_config`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigOverride {
    #[default]
    None,
    Managed(bool),
    Fields(Map<String, Value>),
}

/// `resolve_admin_username` picks the login sent to the remote API: the current user when they
/// can manage the site, else the first administrator, else an empty string
pub fn resolve_admin_username<THost: HostEnvironmentBuilder + ?Sized>(host: &THost) -> String {
    if let Some(current) = host.current_admin_user().filter(|login| !login.is_empty()) {
        return current;
    }

    host.admin_users()
        .into_iter()
        .find(|login| !login.is_empty())
        .unwrap_or_default()
}

/// `build_connect_config` builds the payload describing the site when registering it
pub fn build_connect_config<THost: HostEnvironmentBuilder + ?Sized>(
    host: &THost,
    overrides: ConfigOverride,
) -> Map<String, Value> {
    let username = resolve_admin_username(host);

    let mut config = Map::new();
    config.insert("url".to_string(), Value::String(host.site_url()));
    config.insert(
        "platform_version".to_string(),
        Value::String(host.platform_version()),
    );
    config.insert(
        "runtime_version".to_string(),
        Value::String(host.runtime_version()),
    );
    config.insert("title".to_string(), Value::String(host.site_title()));
    config.insert("icon".to_string(), Value::String(host.site_icon()));
    config.insert(
        "username".to_string(),
        Value::String(STANDARD.encode(username.as_bytes())),
    );

    config.insert("managed".to_string(), Value::Bool(true));

    match overrides {
        ConfigOverride::Managed(managed) => {
            config.insert("managed".to_string(), Value::Bool(managed));
        }
        ConfigOverride::Fields(fields) => config.extend(fields),
        ConfigOverride::None => {}
    }

    config
}
