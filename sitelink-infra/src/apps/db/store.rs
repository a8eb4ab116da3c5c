use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::{self, Value};
use rst_common::with_logging::log::{debug, warn};

use rstdev_storage::engine::rocksdb::executor::Executor;
use rstdev_storage::engine::rocksdb::types::{Instruction, OutputOpts};

use sitelink_core::connect::types::ConnectError;
use sitelink_core::store::SettingsStoreBuilder;

/// `RocksStore` persists settings values as JSON bytes inside a rocksdb column family
///
/// A stored value which can't be decoded is reported as absent, the callers replace it with
/// an empty structure on their next write
#[derive(Clone)]
pub struct RocksStore {
    db: Executor,
}

impl RocksStore {
    pub fn new(db: Executor) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStoreBuilder for RocksStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ConnectError> {
        debug!("[rocks_store:get] key: {}", key);

        let out = self
            .db
            .exec(Instruction::GetCf {
                key: key.to_string(),
            })
            .await
            .map_err(|err| ConnectError::StoreError(err.to_string()))?;

        match out {
            OutputOpts::SingleByte { value } => match value {
                Some(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                    Ok(val) => Ok(Some(val)),
                    Err(err) => {
                        warn!("[rocks_store:get] undecodable value at {}: {}", key, err);
                        Ok(None)
                    }
                },
                None => Ok(None),
            },
            _ => Err(ConnectError::StoreError(String::from(
                "invalid output return type",
            ))),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ConnectError> {
        debug!("[rocks_store:set] key: {}", key);

        let bytes =
            serde_json::to_vec(&value).map_err(|err| ConnectError::JSONError(err.to_string()))?;

        let _ = self
            .db
            .exec(Instruction::SaveCf {
                key: key.to_string(),
                value: bytes,
            })
            .await
            .map_err(|err| ConnectError::StoreError(err.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use rst_common::standard::serde_json::json;
    use rst_common::standard::uuid::Uuid;
    use rst_common::with_tokio::tokio;

    use sitelink_core::connect::credential::CredentialManager;
    use sitelink_core::connect::types::CredentialUsecaseBuilder;
    use sitelink_core::errorlog::ErrorLog;
    use sitelink_core::store::SerializedStore;

    use crate::common::helpers::testdb;

    fn generate_store() -> RocksStore {
        RocksStore::new(testdb::global_db_executor().clone())
    }

    fn unique_key(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let store = generate_store();
        let value = store.get(&unique_key("absent")).await;
        assert!(value.is_ok());
        assert!(value.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = generate_store();
        let key = unique_key("record");

        let record = json!({"api_key": "label|secret", "connect_id": 7});
        assert!(store.set(&key, record.clone()).await.is_ok());
        assert_eq!(store.get(&key).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_undecodable_value() {
        let store = generate_store();
        let key = unique_key("garbage");

        let _ = testdb::global_db_executor()
            .exec(Instruction::SaveCf {
                key: key.clone(),
                value: b"{not json".to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_credentials_over_rocksdb() {
        let store = Arc::new(SerializedStore::new(generate_store()));
        let key = unique_key("credentials");
        let manager = CredentialManager::with_key(store.clone(), &key);

        let (left, right) = tokio::join!(
            manager.set_api_key("label|secret".to_string()),
            manager.set_connect_uuid("uuid-1".to_string())
        );

        assert!(left && right);
        assert_eq!(manager.get_api_key().await, "label|secret");
        assert_eq!(manager.get_connect_uuid().await, "uuid-1");
    }

    #[tokio::test]
    async fn test_error_log_over_rocksdb() {
        let store = Arc::new(generate_store());
        let key = unique_key("errorlog");
        let log = ErrorLog::with_key(store, &key);

        assert!(log.append("first".into(), None).await);
        assert!(log.append("second".into(), None).await);

        let entries = log.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].message, "second");
    }
}
