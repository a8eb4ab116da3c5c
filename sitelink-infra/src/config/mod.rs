mod app;
pub use app::App;

mod database;
pub use database::{Database, RocksDBCommon, RocksDBOptions};

mod remote;
pub use remote::Remote;

mod host;
pub use host::Host;

#[allow(clippy::module_inception)]
mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
