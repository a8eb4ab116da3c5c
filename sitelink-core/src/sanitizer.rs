//! `sanitizer` cleans untrusted payloads before they are persisted or echoed back
//!
//! Text cleaning itself is a pluggable [`TextSanitizer`]. The default [`StripTags`] removes
//! markup, control characters and percent-encoded octets, then collapses whitespace.
use once_cell::sync::Lazy;
use regex::Regex;

use rst_common::standard::serde_json::{Map, Value};

use crate::connect::options::is_empty;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*?>.*?</script\s*>").unwrap());
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*?>.*?</style\s*>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").unwrap());
static OCTET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").unwrap());

/// `TextSanitizer` is the host-defined cleaning applied to every string
///
/// Implementations must be idempotent, cleaning an already cleaned text is a no-op
pub trait TextSanitizer: Send + Sync {
    fn sanitize_text(&self, input: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StripTags;

impl TextSanitizer for StripTags {
    fn sanitize_text(&self, input: &str) -> String {
        let text: String = input
            .chars()
            .filter(|ch| !ch.is_control() || matches!(ch, '\r' | '\n' | '\t'))
            .collect();

        let text = SCRIPT_BLOCK.replace_all(&text, "");
        let text = STYLE_BLOCK.replace_all(&text, "");
        let text = TAG.replace_all(&text, "");
        let mut text = text.replace('<', "&lt;");

        // removing an octet may reveal another one
        while OCTET.is_match(&text) {
            text = OCTET.replace_all(&text, "").into_owned();
        }

        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}

/// `Sanitizer` walks through a JSON value and cleans every string it holds
#[derive(Debug, Clone, Default)]
pub struct Sanitizer<TText = StripTags>
where
    TText: TextSanitizer,
{
    text: TText,
}

impl<TText> Sanitizer<TText>
where
    TText: TextSanitizer,
{
    pub fn new(text: TText) -> Self {
        Self { text }
    }

    pub fn clean_text(&self, input: &str) -> String {
        self.text.sanitize_text(input)
    }

    /// `clean` follows these rules:
    ///
    /// - an empty value is returned untouched
    /// - a string is cleaned with the [`TextSanitizer`]
    /// - an object or a list has each of its values cleaned, keys are untouched. Nested scalars
    ///   are turned into strings before being cleaned
    /// - any other value becomes an empty string
    pub fn clean(&self, value: Value) -> Value {
        if is_empty(&value) {
            return value;
        }

        match value {
            Value::String(text) => Value::String(self.clean_text(&text)),
            Value::Object(fields) => Value::Object(self.clean_map(fields)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.clean_nested(item)).collect())
            }
            _ => Value::String(String::new()),
        }
    }

    fn clean_map(&self, fields: Map<String, Value>) -> Map<String, Value> {
        fields
            .into_iter()
            .map(|(key, val)| (key, self.clean_nested(val)))
            .collect()
    }

    fn clean_nested(&self, value: Value) -> Value {
        match value {
            Value::Object(_) | Value::Array(_) => self.clean(value),
            Value::String(text) => Value::String(self.clean_text(&text)),
            Value::Null => Value::String(String::new()),
            Value::Bool(flag) => Value::String(if flag { "1" } else { "" }.to_string()),
            Value::Number(num) => Value::String(self.clean_text(&num.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::standard::serde_json::json;
    use table_test::table_test;

    #[test]
    fn test_strip_tags() {
        let table = vec![
            ("plain text", "plain text"),
            ("  spaced \n\t out  ", "spaced out"),
            ("<b>bold</b> move", "bold move"),
            ("<script>alert(1)</script>safe", "safe"),
            ("<style>p{}</style>styled", "styled"),
            ("a < b", "a &lt; b"),
            ("100%25 done", "100 done"),
            ("%2%41", "%2"),
            ("bell\u{7}char", "bellchar"),
        ];

        let sanitizer = StripTags;
        for (validator, input, expected) in table_test!(table) {
            validator
                .given(input)
                .when("sanitize text")
                .then(expected)
                .assert_eq(expected.to_string(), sanitizer.sanitize_text(input));
        }
    }

    #[test]
    fn test_clean_empty_values_untouched() {
        let sanitizer: Sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.clean(json!(null)), json!(null));
        assert_eq!(sanitizer.clean(json!(0)), json!(0));
        assert_eq!(sanitizer.clean(json!("")), json!(""));
        assert_eq!(sanitizer.clean(json!({})), json!({}));
    }

    #[test]
    fn test_clean_scalars_become_empty() {
        let sanitizer: Sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.clean(json!(42)), json!(""));
        assert_eq!(sanitizer.clean(json!(true)), json!(""));
    }

    #[test]
    fn test_clean_nested_mapping() {
        let sanitizer: Sanitizer = Sanitizer::default();
        let input = json!({
            "message": "<i>failed</i>",
            "<key>": "kept key",
            "response": {"success": false, "data": {"code": 500, "reason": "bad\ngateway"}},
            "tags": ["<a>", "b"],
        });

        let cleaned = sanitizer.clean(input);
        assert_eq!(
            cleaned,
            json!({
                "message": "failed",
                "<key>": "kept key",
                "response": {"success": "", "data": {"code": "500", "reason": "bad gateway"}},
                "tags": ["", "b"],
            })
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let sanitizer: Sanitizer = Sanitizer::default();
        let inputs = vec![
            json!("<<b>b>x %4<i>1 y"),
            json!("  a\t\tb  "),
            json!({"a": 0, "b": null, "c": {"d": "<p>x</p>", "e": []}, "f": true}),
            json!({"nested": {"deep": {"deeper": "%%4141"}}}),
        ];

        for input in inputs {
            let once = sanitizer.clean(input);
            let twice = sanitizer.clean(once.clone());
            assert_eq!(once, twice);
        }
    }
}
