use super::types::{CommonError, ToValidate};

pub fn validate(validator: impl ToValidate) -> Result<(), CommonError> {
    validator.validate()
}

#[cfg(test)]
pub mod testdb {

    use once_cell::sync::OnceCell;
    use std::env;
    use std::path::PathBuf;

    use rstdev_storage::engine::rocksdb::executor::Executor;

    use crate::apps::db::setup_database;
    use crate::config::{Config, Parser};

    pub fn global_config() -> &'static Config {
        static INSTANCE: OnceCell<Config> = OnceCell::new();
        INSTANCE.get_or_init(|| {
            let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            path.push("src/config/fixtures");

            let toml_file = format!("{}/config.toml", path.display());
            Parser::new(toml_file).parse().unwrap()
        })
    }

    pub fn global_db_executor() -> &'static Executor {
        static INSTANCE: OnceCell<Executor> = OnceCell::new();
        INSTANCE.get_or_init(|| setup_database(global_config().db()).unwrap())
    }
}
