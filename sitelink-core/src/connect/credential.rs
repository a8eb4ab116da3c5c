use std::sync::Arc;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::Utc;
use rst_common::standard::serde_json::{Map, Value};
use rst_common::with_logging::log::{debug, warn};

use sha2::{Digest, Sha256};

use crate::store::SettingsStoreBuilder;

use super::options::{int_value, plan_timestamp_key, Options};
use super::types::*;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `CredentialManager` is the implementation of [`CredentialUsecaseBuilder`]
///
/// The credential record lives under a single key of the injected store. Each getter loads the
/// whole record and projects one field, each setter goes through [`SettingsStoreBuilder::update`]
/// which rewrites the whole record
pub struct CredentialManager<TStore>
where
    TStore: SettingsStoreBuilder,
{
    store: Arc<TStore>,
    key: String,
}

impl<TStore> Clone for CredentialManager<TStore>
where
    TStore: SettingsStoreBuilder,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
        }
    }
}

impl<TStore> CredentialManager<TStore>
where
    TStore: SettingsStoreBuilder,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self::with_key(store, DEFAULT_CREDENTIALS_KEY)
    }

    pub fn with_key(store: Arc<TStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// `options` loads the whole record. A failing store read is logged and gives an empty record
    pub async fn options(&self) -> Options {
        match self.store.get(&self.key).await {
            Ok(stored) => Options::from_stored(stored),
            Err(err) => {
                warn!("[credential:options] unable to read {}: {}", self.key, err);
                Options::new()
            }
        }
    }

    pub async fn get_api_key_or(&self, default_key: &str) -> String {
        self.options()
            .await
            .field(FIELD_API_KEY, default_key.to_string())
    }

    /// `modify` applies `mutate` over the record and persists it. When `mutate` returns `false`
    /// nothing is written
    async fn modify<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut Options) -> bool + Send + 'static,
    {
        let result = self
            .store
            .update(&self.key, move |current| {
                let mut opts = Options::from_stored(current);
                if mutate(&mut opts) {
                    Some(opts.into_value())
                } else {
                    None
                }
            })
            .await;

        match result {
            Ok(written) => written,
            Err(err) => {
                warn!("[credential:modify] unable to update {}: {}", self.key, err);
                false
            }
        }
    }

    async fn set_field(&self, field: &'static str, value: Value) -> bool {
        debug!("[credential:set_field] field: {}", field);

        self.modify(move |opts| {
            opts.set(field, value);
            true
        })
        .await
    }
}

/// `hash_api_key` hashes the secret part of an api key
///
/// A key shaped as `label|secret` only hashes `secret`, anything after a second separator is
/// ignored. An empty key gives an empty string, not the hash of an empty string
pub fn hash_api_key(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }

    let secret = match api_key.split('|').nth(1) {
        Some(secret) => secret,
        None => api_key,
    };

    hex::encode(Sha256::digest(secret.as_bytes()))
}

#[async_trait]
impl<TStore> CredentialUsecaseBuilder for CredentialManager<TStore>
where
    TStore: SettingsStoreBuilder,
{
    async fn get_api_key(&self) -> String {
        self.options().await.get_str(FIELD_API_KEY)
    }

    async fn get_hashed_api_key(&self) -> String {
        hash_api_key(&self.get_api_key().await)
    }

    async fn get_connect_id(&self) -> i64 {
        self.options().await.get_int(FIELD_CONNECT_ID)
    }

    async fn get_connect_uuid(&self) -> String {
        self.options().await.get_str(FIELD_CONNECT_UUID)
    }

    async fn get_origin(&self) -> String {
        self.options().await.get_str(FIELD_ORIGIN)
    }

    async fn get_jwt(&self) -> String {
        self.options().await.get_str(FIELD_JWT)
    }

    async fn get_api_url(&self) -> String {
        self.options().await.get_str(FIELD_API_URL)
    }

    async fn get_migration_group(&self) -> String {
        self.options().await.get_str(FIELD_GROUP_UUID)
    }

    async fn get_response(&self) -> Value {
        self.options()
            .await
            .field(FIELD_RESPONSE, Value::Object(Map::new()))
    }

    async fn set_api_key(&self, api_key: String) -> bool {
        self.set_field(FIELD_API_KEY, Value::String(api_key)).await
    }

    async fn set_connect_id(&self, connect_id: Value) -> bool {
        self.set_field(FIELD_CONNECT_ID, int_value(&connect_id))
            .await
    }

    async fn set_connect_uuid(&self, connect_uuid: String) -> bool {
        self.set_field(FIELD_CONNECT_UUID, Value::String(connect_uuid))
            .await
    }

    async fn set_origin(&self, origin: String) -> bool {
        self.set_field(FIELD_ORIGIN, Value::String(origin)).await
    }

    async fn set_jwt(&self, jwt: String) -> bool {
        self.set_field(FIELD_JWT, Value::String(jwt)).await
    }

    async fn set_api_url(&self, api_url: String) -> bool {
        self.set_field(FIELD_API_URL, Value::String(api_url)).await
    }

    async fn set_migration_group(&self, group_uuid: String) -> bool {
        self.set_field(FIELD_GROUP_UUID, Value::String(group_uuid))
            .await
    }

    async fn has_migration_group(&self, group_uuid: &str) -> bool {
        if group_uuid.is_empty() {
            return false;
        }

        self.get_migration_group().await == group_uuid
    }

    async fn set_plan(&self, plan_id: &str) -> bool {
        let plan_id = plan_id.to_string();
        let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        self.modify(move |opts| {
            if plan_id.is_empty() {
                opts.remove(FIELD_PLAN_ID);
                return true;
            }

            let key = plan_timestamp_key(&plan_id);
            if !opts.contains(&key) {
                opts.set(&key, Value::String(now));
            }

            opts.set(FIELD_PLAN_ID, Value::String(plan_id));
            true
        })
        .await
    }

    async fn remove_plan(&self) -> bool {
        self.modify(|opts| match opts.plan_id() {
            Some(plan_id) => {
                opts.remove(FIELD_PLAN_ID);
                opts.remove(&plan_timestamp_key(&plan_id));
                true
            }
            None => false,
        })
        .await
    }

    async fn get_plan(&self) -> Option<Plan> {
        let opts = self.options().await;
        let plan_id = opts.plan_id()?;
        let plan_timestamp = opts.get_str(&plan_timestamp_key(&plan_id));

        Some(Plan {
            plan_id,
            plan_timestamp,
        })
    }

    async fn get_plan_id(&self) -> String {
        self.get_plan()
            .await
            .map(|plan| plan.plan_id)
            .unwrap_or_default()
    }
}
