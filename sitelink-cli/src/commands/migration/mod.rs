use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as migration_handler;

#[derive(Args, Clone)]
pub struct MigrationArgs {
    #[command(subcommand)]
    pub commands: MigrationCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Migration")]
pub enum MigrationCommands {
    /// Store the migration group this site belongs to
    Set { group_uuid: String },

    /// Check whether this site belongs to the given migration group
    Check { group_uuid: String },
}
