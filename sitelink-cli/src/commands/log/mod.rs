use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as log_handler;

#[derive(Args, Clone)]
pub struct LogArgs {
    #[command(subcommand)]
    pub commands: LogCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Error log")]
pub enum LogCommands {
    /// Print the persisted error log, oldest first
    Show,

    /// Append a message to the error log
    Add { message: String },
}
