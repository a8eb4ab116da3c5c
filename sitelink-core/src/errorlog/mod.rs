//! `errorlog` is a bounded diagnostic log persisted in the settings store
//!
//! The log is a single JSON list kept under its own key, separate from the credential record.
//! Entries are immutable once appended and ordered from the oldest to the newest. Growth is
//! bounded with a batched eviction: when the list holds more than
//! [`types::LOG_CAPACITY`] entries, the first [`types::LOG_EVICTION_BATCH`] are dropped
//! before the next append.
pub mod types;

mod errorlog;
pub use errorlog::ErrorLog;
