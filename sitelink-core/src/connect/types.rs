use std::fmt;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{Map, Value};
use rst_common::with_errors::thiserror::{self, Error};

pub const DEFAULT_CREDENTIALS_KEY: &str = "connect_api_options";
pub const DEFAULT_ERROR_LOG_KEY: &str = "connect_helper_error_log";

pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_API_URL: &str = "api_url";
pub const FIELD_CONNECT_ID: &str = "connect_id";
pub const FIELD_CONNECT_UUID: &str = "connect_uuid";
pub const FIELD_ORIGIN: &str = "origin";
pub const FIELD_JWT: &str = "jwt";
pub const FIELD_PLAN_ID: &str = "plan_id";
pub const FIELD_GROUP_UUID: &str = "group_uuid";
pub const FIELD_RESPONSE: &str = "response";

/// `ConnectError` is a base error types for the `connect` domain
///
/// Only the adapters raise it. The credential manager and the token refresher convert
/// every expected failure into a `false` or an empty value
#[derive(Debug, PartialEq, Error, Clone)]
pub enum ConnectError {
    #[error("store error: {0}")]
    StoreError(String),

    #[error("remote error: {0}")]
    RemoteError(String),

    #[error("json error: {0}")]
    JSONError(String),

    #[error("entropy error: {0}")]
    EntropyError(String),
}

/// `RemoteMethod` is the HTTP verb used by [`RemoteClientBuilder::call`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for RemoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            RemoteMethod::Get => "GET",
            RemoteMethod::Post => "POST",
            RemoteMethod::Put => "PUT",
            RemoteMethod::Delete => "DELETE",
        };

        write!(f, "{}", verb)
    }
}

/// `RemoteResponse` is the decoded envelope returned by the remote management API
///
/// The `raw` property keeps the whole decoded body, it's the value recorded into the error log
/// when a call doesn't give what the caller expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(crate = "self::serde")]
pub struct RemoteResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub data: Value,

    #[serde(skip)]
    pub raw: Value,
}

impl RemoteResponse {
    pub fn new(success: bool, data: Value) -> Self {
        let mut raw = Map::new();
        raw.insert("success".to_string(), Value::Bool(success));
        raw.insert("data".to_string(), data.clone());

        Self {
            success,
            data,
            raw: Value::Object(raw),
        }
    }

    /// `from_raw` builds the envelope from any decoded JSON body. A body that isn't an object
    /// is treated as an unsuccessful response without data
    pub fn from_raw(raw: Value) -> Self {
        let success = raw
            .get("success")
            .map(|val| match val {
                Value::Bool(flag) => *flag,
                Value::Number(num) => num.as_i64().map(|n| n != 0).unwrap_or(false),
                Value::String(text) => !text.is_empty() && text != "0",
                _ => false,
            })
            .unwrap_or(false);

        let data = raw.get("data").cloned().unwrap_or(Value::Null);
        Self { success, data, raw }
    }

    pub fn token(&self) -> Option<String> {
        self.data
            .get("token")
            .and_then(|val| val.as_str())
            .filter(|token| !token.is_empty())
            .map(|token| token.to_string())
    }
}

/// `Plan` is the currently active plan of the connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct Plan {
    pub plan_id: String,
    pub plan_timestamp: String,
}

/// `RemoteClientBuilder` is the transport used to call the remote management API
///
/// Implementers own the base URL, the authentication and the timeout policy. The core only
/// issues `connects/{id}/generate-token`
#[async_trait]
pub trait RemoteClientBuilder: Send + Sync {
    async fn call(
        &self,
        path: String,
        query: Map<String, Value>,
        body: Map<String, Value>,
        method: RemoteMethod,
    ) -> Result<RemoteResponse, ConnectError>;
}

/// `HostEnvironmentBuilder` provides read only facts about the site hosting the connection
pub trait HostEnvironmentBuilder: Send + Sync {
    fn site_url(&self) -> String;
    fn platform_version(&self) -> String;
    fn runtime_version(&self) -> String;
    fn site_title(&self) -> String;
    fn site_icon(&self) -> String;

    /// `current_admin_user` returns the login of the current user only when that user is
    /// allowed to manage the site
    fn current_admin_user(&self) -> Option<String>;

    /// `admin_users` lists the logins of every administrator, in the host's order
    fn admin_users(&self) -> Vec<String>;

    fn is_managed(&self) -> bool;
}

/// `CredentialUsecaseBuilder` is the main entrypoint to read and mutate the credential record
///
/// Getters never fail, an absent field behaves as an empty value. Setters return `true` only
/// when the whole record has been written back to the store
#[async_trait]
pub trait CredentialUsecaseBuilder: Send + Sync {
    async fn get_api_key(&self) -> String;
    async fn get_hashed_api_key(&self) -> String;
    async fn get_connect_id(&self) -> i64;
    async fn get_connect_uuid(&self) -> String;
    async fn get_origin(&self) -> String;
    async fn get_jwt(&self) -> String;
    async fn get_api_url(&self) -> String;
    async fn get_migration_group(&self) -> String;
    async fn get_response(&self) -> Value;

    async fn set_api_key(&self, api_key: String) -> bool;
    async fn set_connect_id(&self, connect_id: Value) -> bool;
    async fn set_connect_uuid(&self, connect_uuid: String) -> bool;
    async fn set_origin(&self, origin: String) -> bool;
    async fn set_jwt(&self, jwt: String) -> bool;
    async fn set_api_url(&self, api_url: String) -> bool;
    async fn set_migration_group(&self, group_uuid: String) -> bool;
    async fn has_migration_group(&self, group_uuid: &str) -> bool;

    async fn set_plan(&self, plan_id: &str) -> bool;
    async fn remove_plan(&self) -> bool;
    async fn get_plan(&self) -> Option<Plan>;
    async fn get_plan_id(&self) -> String;
}
