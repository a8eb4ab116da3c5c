pub mod db;
pub mod host;
pub mod remote;

pub use db::{setup_database, RocksStore};
pub use host::StaticHost;
pub use remote::HttpRemoteClient;
