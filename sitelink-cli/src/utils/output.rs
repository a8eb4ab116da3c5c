use cli_table::{print_stdout, Table, WithTitle};

use rst_common::standard::serde_json::{self, Value};

use crate::types::CliError;

#[derive(Table, Clone)]
pub struct FieldRow {
    #[table(title = "Field")]
    pub field: String,
    #[table(title = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: &str, value: String) -> Self {
        Self {
            field: field.to_string(),
            value,
        }
    }
}

#[derive(Table, Clone)]
pub struct LogRow {
    #[table(title = "Time")]
    pub time: String,
    #[table(title = "Message")]
    pub message: String,
    #[table(title = "Error")]
    pub error: String,
    #[table(title = "Location")]
    pub location: String,
    #[table(title = "Extra")]
    pub extra: String,
}

pub fn print_fields(rows: Vec<FieldRow>) -> Result<(), CliError> {
    print_stdout(rows.with_title()).map_err(|err| CliError::OutputError(err.to_string()))
}

pub fn print_logs(rows: Vec<LogRow>) -> Result<(), CliError> {
    print_stdout(rows.with_title()).map_err(|err| CliError::OutputError(err.to_string()))
}

pub fn to_pretty_json(value: &Value) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::OutputError(err.to_string()))
}

/// `render_hashed_key` is the line printed by `credentials hashed-key`
pub fn render_hashed_key(hashed: &str) -> String {
    if hashed.is_empty() {
        return "no api key stored".to_string();
    }

    hashed.to_string()
}

/// `render_membership` is the line printed by `migration check`
pub fn render_membership(group_uuid: &str, member: bool) -> String {
    format!("{}: {}", group_uuid, member)
}

/// `mask_secret` keeps a short prefix of a secret, enough to recognize it
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }

    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_test::table_test;

    #[test]
    fn test_mask_secret() {
        let table = vec![
            ("", ""),
            ("ab", "ab****"),
            ("label|secret", "labe****"),
        ];

        for (validator, input, expected) in table_test!(table) {
            validator
                .given(input)
                .when("mask secret")
                .then(expected)
                .assert_eq(expected.to_string(), mask_secret(input));
        }
    }

    #[test]
    fn test_render_hashed_key() {
        assert_eq!(render_hashed_key(""), "no api key stored");
        assert_eq!(render_hashed_key("label|abc123"), "label|abc123");
    }

    #[test]
    fn test_render_membership() {
        assert_eq!(render_membership("group-1", true), "group-1: true");
        assert_eq!(render_membership("group-2", false), "group-2: false");
    }
}
