use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as token_handler;

#[derive(Args, Clone)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub commands: TokenCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Token")]
pub enum TokenCommands {
    /// Ask the remote API for a fresh token and store it
    Refresh {
        /// Defaults to the stored connect id
        #[arg(long)]
        connect_id: Option<i64>,
    },
}
