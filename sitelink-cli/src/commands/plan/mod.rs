use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as plan_handler;

#[derive(Args, Clone)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub commands: PlanCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Plan")]
pub enum PlanCommands {
    /// Print the active plan and when it was first activated
    Show,

    /// Activate a plan, its first activation time is kept
    Set { plan_id: String },

    /// Unset the active plan but keep its activation time
    Clear,

    /// Unset the active plan and forget its activation time
    Remove,
}
