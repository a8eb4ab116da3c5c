//! `sitelink-core` holds the business logic of a site's connection identity with the remote
//! management service.
//!
//! The crate is split into sub-domains:
//!
//! - `connect`, the credential record, its typed accessors, the credential manager, the token
//!   refresher and the connect config payload builder
//! - `errorlog`, a bounded diagnostic log persisted next to the credentials
//! - `sanitizer`, recursive cleaning of untrusted payloads before they are persisted
//! - `entropy`, random identifiers generated from a two-tier entropy source
//! - `store`, the settings store abstraction every persisted value goes through
//!
//! ---
//!
//! Nothing in this crate talks to a concrete database or HTTP client. The storage backend,
//! the remote API transport and the host queries are injected through the traits defined at
//! [`store::SettingsStoreBuilder`], [`connect::types::RemoteClientBuilder`] and
//! [`connect::types::HostEnvironmentBuilder`]. Concrete adapters live in `sitelink-infra`.
pub mod connect;
pub mod entropy;
pub mod errorlog;
pub mod sanitizer;
pub mod store;
