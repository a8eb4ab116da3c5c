use rst_common::with_logging::log::debug;

use rstdev_storage::engine::rocksdb::db::DB;
use rstdev_storage::engine::rocksdb::executor::Executor;
use rstdev_storage::engine::rocksdb::options::Options;

use crate::common::types::CommonError;
use crate::config::Database;

mod store;
pub use store::RocksStore;

/// `setup_database` opens the rocksdb database described by the `[database]` section
pub fn setup_database(config: &Database) -> Result<Executor, CommonError> {
    let (path, cf_name) = config.get_common().get();
    let opts_db_main = config.get_db_options();
    debug!("[db:setup] path: {path} | cf name: {cf_name}");

    let mut db_opts = Options::new(path, cf_name.clone());
    db_opts.build_default_opts().set_db_opts(move |opt| {
        opt.create_if_missing(opts_db_main.get_create_if_missing());
        opt.create_missing_column_families(opts_db_main.get_create_missing_columns());
        opt.set_error_if_exists(opts_db_main.get_set_error_if_exists());

        opt
    });

    let mut db = DB::new(db_opts).map_err(|err| CommonError::DBError(err.to_string()))?;
    let db_instance = db
        .build()
        .map_err(|err| CommonError::DBError(err.to_string()))?;

    db.set_db(db_instance);
    Ok(Executor::new(db, cf_name))
}
