//! `store` defines the settings store abstraction
//!
//! Every persisted value is a JSON [`Value`] saved under a named key. The credential record
//! and the error log are both rewritten as a whole on each change, so the only mutation
//! primitive exposed to the rest of the crate is [`SettingsStoreBuilder::update`].
//!
//! The provided `update` is a plain read-modify-write: two concurrent callers changing
//! unrelated fields of the same record race and the last writer wins at the granularity of
//! the whole record. Wrap the store with [`SerializedStore`] to hold a single-writer lock
//! across the read and the write.
use std::collections::HashMap;
use std::sync::Arc;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;
use rst_common::with_tokio::tokio::sync::Mutex;

use crate::connect::types::ConnectError;

/// `SettingsStoreBuilder` is a trait behavior used as the persistent key-value store
///
/// `get` must return `Ok(None)` for an absent key. Implementers are free to return
/// `Ok(None)` for undecodable values too, the callers substitute an empty structure anyway
#[async_trait]
pub trait SettingsStoreBuilder: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ConnectError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), ConnectError>;

    /// `update` reads the current value, gives it to `mutate` and writes back whatever it
    /// returns. Returning `None` from `mutate` skips the write
    ///
    /// The result is `Ok(true)` when a write happened, `Ok(false)` when it was skipped
    async fn update<F>(&self, key: &str, mutate: F) -> Result<bool, ConnectError>
    where
        F: FnOnce(Option<Value>) -> Option<Value> + Send + 'static,
    {
        let current = self.get(key).await?;
        match mutate(current) {
            Some(next) => {
                self.set(key, next).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// `SerializedStore` wraps any store with a single-writer mutex
///
/// Reads go straight to the inner store. Updates hold the lock from the read until the write
/// has completed, so concurrent updates from this process never clobber each other. Writers
/// living in other processes are not covered
pub struct SerializedStore<TStore>
where
    TStore: SettingsStoreBuilder,
{
    inner: TStore,
    lock: Arc<Mutex<()>>,
}

impl<TStore> SerializedStore<TStore>
where
    TStore: SettingsStoreBuilder,
{
    pub fn new(inner: TStore) -> Self {
        Self {
            inner,
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl<TStore> SettingsStoreBuilder for SerializedStore<TStore>
where
    TStore: SettingsStoreBuilder,
{
    async fn get(&self, key: &str) -> Result<Option<Value>, ConnectError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ConnectError> {
        let _guard = self.lock.lock().await;
        self.inner.set(key, value).await
    }

    async fn update<F>(&self, key: &str, mutate: F) -> Result<bool, ConnectError>
    where
        F: FnOnce(Option<Value>) -> Option<Value> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        debug!("[store:update] lock acquired for key: {}", key);

        let current = self.inner.get(key).await?;
        match mutate(current) {
            Some(next) => {
                self.inner.set(key, next).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// `MemoryStore` keeps every value in memory
///
/// Clones share the same map. It's used as the test double of the persistent stores and as
/// a scratch store for dry runs
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_value(self, key: &str, value: Value) -> Self {
        self.values.lock().await.insert(key.to_string(), value);
        self
    }
}

#[async_trait]
impl SettingsStoreBuilder for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ConnectError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ConnectError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    /// A store that yields between its read and its write, widening the race window
    #[derive(Clone, Default)]
    struct SlowStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl SettingsStoreBuilder for SlowStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, ConnectError> {
            let value = self.inner.get(key).await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            value
        }

        async fn set(&self, key: &str, value: Value) -> Result<(), ConnectError> {
            self.inner.set(key, value).await
        }
    }

    fn insert_field(field: &'static str) -> impl FnOnce(Option<Value>) -> Option<Value> {
        move |current| {
            let mut record = current
                .and_then(|val| val.as_object().cloned())
                .unwrap_or_default();
            record.insert(field.to_string(), json!(true));
            Some(Value::Object(record))
        }
    }

    #[tokio::test]
    async fn test_update_skips_write() {
        let store = MemoryStore::new();
        let written = store.update("key", |_| None).await;
        assert_eq!(written, Ok(false));
        assert_eq!(store.get("key").await, Ok(None));
    }

    #[tokio::test]
    async fn test_unserialized_updates_lose_a_write() {
        let store = Arc::new(SlowStore::default());

        let first = store.clone();
        let second = store.clone();
        let (a, b) = tokio::join!(
            async move { first.update("record", insert_field("a")).await },
            async move { second.update("record", insert_field("b")).await },
        );
        assert_eq!(a, Ok(true));
        assert_eq!(b, Ok(true));

        let record = store.get("record").await.unwrap().unwrap();
        assert_eq!(record.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_serialized_updates_keep_both_fields() {
        let store = Arc::new(SerializedStore::new(SlowStore::default()));

        let first = store.clone();
        let second = store.clone();
        let _ = tokio::join!(
            async move { first.update("record", insert_field("a")).await },
            async move { second.update("record", insert_field("b")).await },
        );

        let record = store.get("record").await.unwrap().unwrap();
        assert_eq!(record, json!({"a": true, "b": true}));
    }
}
