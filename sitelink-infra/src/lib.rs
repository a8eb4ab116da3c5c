//! `sitelink-infra` provides the concrete adapters behind the `sitelink-core` traits
//!
//! - a rocksdb backed settings store
//! - an HTTP client for the remote management API
//! - a host description read from the configuration file
//!
//! [`Sitelink`] wires all of them from one parsed [`config::Config`].
use std::sync::Arc;

use rst_common::with_logging::log::{debug, info};

use sitelink_core::connect::types::CredentialUsecaseBuilder;
use sitelink_core::connect::{CredentialManager, TokenRefresher};
use sitelink_core::errorlog::ErrorLog;
use sitelink_core::store::SerializedStore;

pub mod apps;
pub mod common;
pub mod config;

use apps::{setup_database, HttpRemoteClient, RocksStore, StaticHost};
use common::helpers;
use common::types::CommonError;
use config::{Config, Parser};

/// Every value goes through a single-writer wrapper around the rocksdb store
pub type Store = SerializedStore<RocksStore>;

pub struct Sitelink {
    config: Config,
}

impl Sitelink {
    pub fn new(conf_file: &str) -> Result<Self, CommonError> {
        let config = Parser::new(conf_file.to_string())
            .parse()
            .map_err(|err| CommonError::ConfigError(err.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, CommonError> {
        helpers::validate(config.clone())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `build` opens the database and returns the services sharing it
    pub fn build(&self) -> Result<Services, CommonError> {
        let executor = setup_database(self.config.db())?;
        let store = Arc::new(SerializedStore::new(RocksStore::new(executor)));
        let (credentials_key, error_log_key) = self.config.app().get_keys();
        debug!("[sitelink:build] credentials: {credentials_key} | error log: {error_log_key}");

        Ok(Services {
            credentials: CredentialManager::with_key(store.clone(), &credentials_key),
            log: ErrorLog::with_key(store, &error_log_key),
            host: StaticHost::new(self.config.host().clone()),
            config: self.config.clone(),
        })
    }
}

pub struct Services {
    pub credentials: CredentialManager<Store>,
    pub log: ErrorLog<Store>,
    pub host: StaticHost,
    config: Config,
}

impl Services {
    /// `remote_base_url` prefers the configured base url, then the `api_url` saved in the
    /// credential record
    pub async fn remote_base_url(&self) -> Result<String, CommonError> {
        let configured = self.config.remote().base_url();
        if !configured.is_empty() {
            return Ok(configured);
        }

        let stored = self.credentials.get_api_url().await;
        if stored.is_empty() {
            return Err(CommonError::RemoteError(
                "missing remote base url".to_string(),
            ));
        }

        Ok(stored)
    }

    /// `remote_api_key` is the api key saved in the credential record, or the configured one
    /// when nothing is saved
    pub async fn remote_api_key(&self) -> String {
        self.credentials
            .get_api_key_or(&self.config.remote().api_key())
            .await
    }

    pub async fn build_refresher(
        &self,
    ) -> Result<TokenRefresher<Store, HttpRemoteClient>, CommonError> {
        let base_url = self.remote_base_url().await?;
        let api_key = self.remote_api_key().await;
        info!("[sitelink:build_refresher] remote: {}", base_url);

        let remote = HttpRemoteClient::new(&base_url, &api_key, self.config.remote().timeout())
            .map_err(|err| CommonError::RemoteError(err.to_string()))?;

        Ok(TokenRefresher::new(
            self.credentials.clone(),
            self.log.clone(),
            Arc::new(remote),
        ))
    }
}
