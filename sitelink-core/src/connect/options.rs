use rst_common::standard::serde_json::{Map, Number, Value};

use super::types::FIELD_PLAN_ID;

/// `Options` is the credential record, a flat JSON object persisted under one store key
///
/// A field which doesn't exist behaves as an empty value, never as an error. Values read from
/// the store which are not an object are replaced by an empty record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    fields: Map<String, Value>,
}

/// `FieldValue` is the set of types a record field can be projected into
///
/// Each implementation decides what "empty" means for a stored value, and how a non-empty
/// stored value is converted. This replaces the runtime type sniffing on the default value
pub trait FieldValue: Sized {
    fn from_field(stored: Option<&Value>, default: Self) -> Self;
}

impl FieldValue for String {
    fn from_field(stored: Option<&Value>, default: Self) -> Self {
        match stored.filter(|val| !is_empty(val)) {
            Some(Value::String(text)) => text.to_owned(),
            Some(Value::Number(num)) => num.to_string(),
            Some(Value::Bool(true)) => "1".to_string(),
            _ => default,
        }
    }
}

impl FieldValue for bool {
    fn from_field(stored: Option<&Value>, default: Self) -> Self {
        match stored {
            None | Some(Value::Null) => default,
            Some(val) => !is_falsy(val),
        }
    }
}

impl FieldValue for i64 {
    fn from_field(stored: Option<&Value>, default: Self) -> Self {
        match stored.filter(|val| !is_empty(val)) {
            Some(val) => coerce_int(val),
            None => default,
        }
    }
}

impl FieldValue for Value {
    fn from_field(stored: Option<&Value>, default: Self) -> Self {
        match stored.filter(|val| !is_empty(val)) {
            Some(val) => val.to_owned(),
            None => default,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// `from_stored` recovers a record from whatever the store returned
    pub fn from_stored(stored: Option<Value>) -> Self {
        match stored {
            Some(Value::Object(fields)) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field<T: FieldValue>(&self, key: &str, default: T) -> T {
        T::from_field(self.fields.get(key), default)
    }

    pub fn get_str(&self, key: &str) -> String {
        self.field(key, String::new())
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.field(key, 0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// `plan_id` returns the active plan id, or `None` when no plan is set
    pub fn plan_id(&self) -> Option<String> {
        Some(self.get_str(FIELD_PLAN_ID)).filter(|id| !id.is_empty())
    }
}

impl From<Map<String, Value>> for Options {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// `plan_timestamp_key` builds the flat key holding the first activation time of a plan
///
/// The `plan_{id}_timestamp` format is kept as is, existing records depend on it
pub fn plan_timestamp_key(plan_id: &str) -> String {
    format!("plan_{}_timestamp", plan_id)
}

/// `is_empty` matches the values considered as "not set": null, false, zero, an empty
/// string, the string "0" and empty collections
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// `is_falsy` is used by boolean fields, only zero-like and blank scalars are false
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Value::String(text) => text.is_empty() || text == "0",
        _ => false,
    }
}

/// `coerce_int` converts any stored value into an integer
///
/// Strings are parsed from their leading sign and digits, floats are truncated, booleans
/// become 0 or 1 and everything else is 0
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().map(|n| n.trunc() as i64))
            .unwrap_or(0),
        Value::Bool(flag) => i64::from(*flag),
        Value::String(text) => {
            let trimmed = text.trim_start();
            let mut end = 0;
            for (idx, ch) in trimmed.char_indices() {
                if ch.is_ascii_digit() || (idx == 0 && (ch == '-' || ch == '+')) {
                    end = idx + ch.len_utf8();
                } else {
                    break;
                }
            }

            trimmed[..end].parse::<i64>().unwrap_or(0)
        }
        _ => 0,
    }
}

pub fn int_value(value: &Value) -> Value {
    Value::Number(Number::from(coerce_int(value)))
}
