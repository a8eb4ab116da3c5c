//! `connect` holds everything related to the connection between this site and the remote
//! management API
//!
//! - `credential`: the credential record and its plan bookkeeping
//! - `token`: short lived token refresh
//! - `config`: the payload describing the site when registering it
pub mod config;
pub mod credential;
pub mod options;
pub mod token;
pub mod types;

pub use config::{build_connect_config, resolve_admin_username, ConfigOverride};
pub use credential::{hash_api_key, CredentialManager};
pub use token::TokenRefresher;
