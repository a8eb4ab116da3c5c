use std::error::Error as StdError;
use std::panic::Location;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{Map, Value};

/// Once the log holds more entries than this, the oldest batch is evicted before the next append
pub const LOG_CAPACITY: usize = 150;

/// Number of entries dropped at once when the capacity is exceeded
pub const LOG_EVICTION_BATCH: usize = 50;

/// `LogPayload` is what a caller hands to the error log
///
/// A plain message is wrapped as `{message}`, a mapping is kept as is after sanitization
#[derive(Debug, Clone, PartialEq)]
pub enum LogPayload {
    Message(String),
    Fields(Map<String, Value>),
}

impl From<&str> for LogPayload {
    fn from(message: &str) -> Self {
        LogPayload::Message(message.to_string())
    }
}

impl From<String> for LogPayload {
    fn from(message: String) -> Self {
        LogPayload::Message(message)
    }
}

impl From<Map<String, Value>> for LogPayload {
    fn from(fields: Map<String, Value>) -> Self {
        LogPayload::Fields(fields)
    }
}

/// `Cause` describes the failure behind a log entry: its message and where it was captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct Cause {
    pub error: String,
    pub line: u32,
    pub file: String,
}

impl Cause {
    pub fn new(error: String, line: u32, file: String) -> Self {
        Self { error, line, file }
    }

    /// `capture` builds a cause from any error, the location is the caller's
    #[track_caller]
    pub fn capture(err: &dyn StdError) -> Self {
        let location = Location::caller();
        Self {
            error: err.to_string(),
            line: location.line(),
            file: location.file().to_string(),
        }
    }
}

/// `ErrorLogEntry` is the typed view of a stored log entry
///
/// Unknown fields coming from the payload are kept inside `extra`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct ErrorLogEntry {
    #[serde(default)]
    pub message: String,

    pub time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
