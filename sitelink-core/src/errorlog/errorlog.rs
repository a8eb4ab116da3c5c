use std::sync::Arc;

use rst_common::standard::chrono::Utc;
use rst_common::standard::serde_json::{self, Map, Value};
use rst_common::with_logging::log::{debug, warn};

use crate::connect::credential::TIMESTAMP_FORMAT;
use crate::connect::types::DEFAULT_ERROR_LOG_KEY;
use crate::sanitizer::{Sanitizer, StripTags, TextSanitizer};
use crate::store::SettingsStoreBuilder;

use super::types::*;

/// `ErrorLog` is a bounded, append-only list of diagnostic entries kept in the settings store
///
/// Entries are sanitized before being persisted. When the stored list is longer than
/// [`LOG_CAPACITY`], the oldest [`LOG_EVICTION_BATCH`] entries are dropped before appending
pub struct ErrorLog<TStore, TText = StripTags>
where
    TStore: SettingsStoreBuilder,
    TText: TextSanitizer,
{
    store: Arc<TStore>,
    key: String,
    sanitizer: Arc<Sanitizer<TText>>,
}

impl<TStore, TText> Clone for ErrorLog<TStore, TText>
where
    TStore: SettingsStoreBuilder,
    TText: TextSanitizer,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            sanitizer: self.sanitizer.clone(),
        }
    }
}

impl<TStore> ErrorLog<TStore>
where
    TStore: SettingsStoreBuilder,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self::with_sanitizer(store, DEFAULT_ERROR_LOG_KEY, Sanitizer::default())
    }

    pub fn with_key(store: Arc<TStore>, key: &str) -> Self {
        Self::with_sanitizer(store, key, Sanitizer::default())
    }
}

impl<TStore, TText> ErrorLog<TStore, TText>
where
    TStore: SettingsStoreBuilder,
    TText: TextSanitizer + 'static,
{
    pub fn with_sanitizer(store: Arc<TStore>, key: &str, sanitizer: Sanitizer<TText>) -> Self {
        Self {
            store,
            key: key.to_string(),
            sanitizer: Arc::new(sanitizer),
        }
    }

    /// `append` records one entry and returns whether the store accepted the write
    pub async fn append(&self, payload: LogPayload, cause: Option<Cause>) -> bool {
        let entry = self.build_entry(payload, cause);
        debug!("[errorlog:append] key: {}", self.key);

        let result = self
            .store
            .update(&self.key, move |current| {
                let mut entries = entries_from_stored(current);
                if entries.len() > LOG_CAPACITY {
                    entries.drain(..LOG_EVICTION_BATCH);
                }

                entries.push(entry);
                Some(Value::Array(entries))
            })
            .await;

        match result {
            Ok(written) => written,
            Err(err) => {
                warn!("[errorlog:append] unable to persist entry: {}", err);
                false
            }
        }
    }

    /// `read` returns the stored entries verbatim, or nothing when the stored value is missing
    /// or isn't a list
    pub async fn read(&self) -> Vec<Value> {
        match self.store.get(&self.key).await {
            Ok(stored) => entries_from_stored(stored),
            Err(err) => {
                warn!("[errorlog:read] unable to read {}: {}", self.key, err);
                Vec::new()
            }
        }
    }

    /// `entries` is the typed view of [`ErrorLog::read`], malformed entries are skipped
    pub async fn entries(&self) -> Vec<ErrorLogEntry> {
        self.read()
            .await
            .into_iter()
            .filter_map(|val| serde_json::from_value::<ErrorLogEntry>(val).ok())
            .collect()
    }

    fn build_entry(&self, payload: LogPayload, cause: Option<Cause>) -> Value {
        let mut entry = match payload {
            LogPayload::Fields(fields) => match self.sanitizer.clean(Value::Object(fields)) {
                Value::Object(cleaned) => cleaned,
                _ => Map::new(),
            },
            LogPayload::Message(message) => {
                let mut fields = Map::new();
                fields.insert(
                    "message".to_string(),
                    Value::String(self.sanitizer.clean_text(&message)),
                );
                fields
            }
        };

        entry.insert(
            "time".to_string(),
            Value::String(Utc::now().format(TIMESTAMP_FORMAT).to_string()),
        );

        if let Some(cause) = cause {
            entry.insert("error".to_string(), Value::String(cause.error));
            entry.insert("line".to_string(), Value::from(cause.line));
            entry.insert("file".to_string(), Value::String(cause.file));
        }

        Value::Object(entry)
    }
}

fn entries_from_stored(stored: Option<Value>) -> Vec<Value> {
    match stored {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    }
}
