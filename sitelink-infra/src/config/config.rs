use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{App, Database, Host, Remote};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Config {
    #[serde(default)]
    pub(super) app: App,

    #[serde(default)]
    pub(super) database: Database,

    #[serde(default)]
    pub(super) remote: Remote,

    #[serde(default)]
    pub(super) host: Host,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn with_remote(mut self, remote: Remote) -> Self {
        self.remote = remote;
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn db(&self) -> &Database {
        &self.database
    }

    pub fn remote(&self) -> &Remote {
        &self.remote
    }

    pub fn host(&self) -> &Host {
        &self.host
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        self.app.validate()?;
        self.database.validate()?;
        self.remote.validate()?;
        self.host.validate()?;

        Ok(())
    }
}
