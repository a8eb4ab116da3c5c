use std::sync::Arc;

use rst_common::standard::serde_json::{Map, Value};
use rst_common::with_logging::log::{debug, info, warn};

use crate::errorlog::types::LogPayload;
use crate::errorlog::ErrorLog;
use crate::store::SettingsStoreBuilder;

use super::credential::CredentialManager;
use super::types::*;

const REFRESH_FAILED_MESSAGE: &str = "token refresh failed, response from generate-token api";

/// `TokenRefresher` asks the remote management API for a fresh token and stores it as the jwt
///
/// There is a single attempt per call. Any failure is recorded into the [`ErrorLog`]
pub struct TokenRefresher<TStore, TRemote>
where
    TStore: SettingsStoreBuilder,
    TRemote: RemoteClientBuilder,
{
    credentials: CredentialManager<TStore>,
    log: ErrorLog<TStore>,
    remote: Arc<TRemote>,
}

impl<TStore, TRemote> TokenRefresher<TStore, TRemote>
where
    TStore: SettingsStoreBuilder,
    TRemote: RemoteClientBuilder,
{
    pub fn new(
        credentials: CredentialManager<TStore>,
        log: ErrorLog<TStore>,
        remote: Arc<TRemote>,
    ) -> Self {
        Self {
            credentials,
            log,
            remote,
        }
    }

    /// `refresh` returns `true` only when a token has been received and persisted
    ///
    /// When `connect_id` is `None` or zero, the stored connect id is used. Without any connect
    /// id, nothing is called
    pub async fn refresh(&self, connect_id: Option<i64>) -> bool {
        let connect_id = match connect_id.filter(|id| *id != 0) {
            Some(id) => id,
            None => self.credentials.get_connect_id().await,
        };

        if connect_id == 0 {
            debug!("[token:refresh] missing connect id, skipped");
            return false;
        }

        let path = format!("connects/{}/generate-token", connect_id);
        debug!("[token:refresh] calling: {}", path);

        let result = self
            .remote
            .call(path, Map::new(), Map::new(), RemoteMethod::Get)
            .await;

        let response = match result {
            Ok(resp) => match resp.token() {
                Some(token) if resp.success => {
                    info!("[token:refresh] received token for connect: {}", connect_id);
                    return self.credentials.set_jwt(token).await;
                }
                _ => resp.raw,
            },
            Err(err) => {
                warn!("[token:refresh] remote call failed: {}", err);
                Value::String(err.to_string())
            }
        };

        self.record_failure(connect_id, response).await;
        false
    }

    async fn record_failure(&self, connect_id: i64, response: Value) {
        let mut fields = Map::new();
        fields.insert(
            "message".to_string(),
            Value::String(REFRESH_FAILED_MESSAGE.to_string()),
        );
        fields.insert("response".to_string(), response);
        fields.insert("connect_id".to_string(), Value::from(connect_id));

        if !self.log.append(LogPayload::from(fields), None).await {
            warn!("[token:refresh] unable to record the failure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockall::mock;
    use mockall::predicate::eq;
    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    use crate::store::MemoryStore;

    mock!(
        FakeRemote{}

        #[async_trait]
        impl RemoteClientBuilder for FakeRemote {
            async fn call(
                &self,
                path: String,
                query: Map<String, Value>,
                body: Map<String, Value>,
                method: RemoteMethod,
            ) -> Result<RemoteResponse, ConnectError>;
        }
    );

    async fn generate_refresher(
        remote: MockFakeRemote,
        seed: Value,
    ) -> (TokenRefresher<MemoryStore, MockFakeRemote>, Arc<MemoryStore>) {
        let store = Arc::new(
            MemoryStore::new()
                .with_value(DEFAULT_CREDENTIALS_KEY, seed)
                .await,
        );

        let refresher = TokenRefresher::new(
            CredentialManager::new(store.clone()),
            ErrorLog::new(store.clone()),
            Arc::new(remote),
        );

        (refresher, store)
    }

    #[tokio::test]
    async fn test_refresh_without_connect_id() {
        let mut remote = MockFakeRemote::new();
        remote.expect_call().times(0);

        let (refresher, _) = generate_refresher(remote, json!({"jwt": "old"})).await;
        assert!(!refresher.refresh(None).await);
        assert!(!refresher.refresh(Some(0)).await);
        assert!(refresher.log.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let mut remote = MockFakeRemote::new();
        remote
            .expect_call()
            .with(
                eq("connects/12/generate-token".to_string()),
                eq(Map::new()),
                eq(Map::new()),
                eq(RemoteMethod::Get),
            )
            .times(1)
            .returning(|_, _, _, _| Ok(RemoteResponse::new(true, json!({"token": "abc"}))));

        let (refresher, _) = generate_refresher(remote, json!({"connect_id": 12})).await;
        assert!(refresher.refresh(None).await);
        assert_eq!(refresher.credentials.get_jwt().await, "abc");
        assert!(refresher.log.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_argument_wins() {
        let mut remote = MockFakeRemote::new();
        remote
            .expect_call()
            .withf(|path, _, _, _| path == "connects/99/generate-token")
            .times(1)
            .returning(|_, _, _, _| Ok(RemoteResponse::new(true, json!({"token": "xyz"}))));

        let (refresher, _) = generate_refresher(remote, json!({"connect_id": 12})).await;
        assert!(refresher.refresh(Some(99)).await);
        assert_eq!(refresher.credentials.get_jwt().await, "xyz");
    }

    #[tokio::test]
    async fn test_refresh_unsuccessful_response() {
        let mut remote = MockFakeRemote::new();
        remote
            .expect_call()
            .times(1)
            .returning(|_, _, _, _| Ok(RemoteResponse::from_raw(json!({"success": false}))));

        let (refresher, _) =
            generate_refresher(remote, json!({"connect_id": 12, "jwt": "old"})).await;
        assert!(!refresher.refresh(None).await);
        assert_eq!(refresher.credentials.get_jwt().await, "old");

        let entries = refresher.log.read().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["message"], json!(REFRESH_FAILED_MESSAGE));
        assert_eq!(entries[0]["connect_id"], json!("12"));
        assert_eq!(entries[0]["response"], json!({"success": ""}));
    }

    #[tokio::test]
    async fn test_refresh_success_without_token() {
        let mut remote = MockFakeRemote::new();
        remote
            .expect_call()
            .times(1)
            .returning(|_, _, _, _| Ok(RemoteResponse::new(true, json!({"token": ""}))));

        let (refresher, _) = generate_refresher(remote, json!({"connect_id": 3})).await;
        assert!(!refresher.refresh(None).await);
        assert_eq!(refresher.log.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_network_error() {
        let mut remote = MockFakeRemote::new();
        remote
            .expect_call()
            .times(1)
            .returning(|_, _, _, _| Err(ConnectError::RemoteError("timed out".to_string())));

        let (refresher, _) =
            generate_refresher(remote, json!({"connect_id": 12, "jwt": "old"})).await;
        assert!(!refresher.refresh(None).await);
        assert_eq!(refresher.credentials.get_jwt().await, "old");

        let entries = refresher.log.read().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["response"], json!("remote error: timed out"));
    }
}
