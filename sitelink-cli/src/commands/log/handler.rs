use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use sitelink_core::errorlog::types::{ErrorLogEntry, LogPayload};

use crate::commands::ensure_saved;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::{print_logs, LogRow};

use super::LogCommands;

pub async fn handle_commands(ctx: &ContextHandler, commands: LogCommands) -> Result<(), CliError> {
    debug!("[log] command handler triggered...");
    let log = &ctx.services().log;

    match commands {
        LogCommands::Show => {
            let entries = log.entries().await;
            if entries.is_empty() {
                println!("error log is empty");
                return Ok(());
            }

            print_logs(entries.into_iter().map(to_log_row).collect())?;
        }
        LogCommands::Add { message } => {
            debug!("[log:add] message: {message}");
            ensure_saved(log.append(LogPayload::from(message), None).await, "error log")?;
        }
    }

    Ok(())
}

fn to_log_row(entry: ErrorLogEntry) -> LogRow {
    let location = match (entry.file, entry.line) {
        (Some(file), Some(line)) => format!("{}:{}", file, line),
        (Some(file), None) => file,
        _ => String::new(),
    };

    let extra = if entry.extra.is_empty() {
        String::new()
    } else {
        Value::Object(entry.extra).to_string()
    };

    LogRow {
        time: entry.time,
        message: entry.message,
        error: entry.error.unwrap_or_default(),
        location,
        extra,
    }
}
