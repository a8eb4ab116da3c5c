use rst_common::with_logging::log::{debug, info};

use sitelink_core::connect::types::CredentialUsecaseBuilder;

use crate::commands::ensure_saved;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::{print_fields, FieldRow};

use super::PlanCommands;

pub async fn handle_commands(ctx: &ContextHandler, commands: PlanCommands) -> Result<(), CliError> {
    debug!("[plan] command handler triggered...");
    let credentials = &ctx.services().credentials;

    match commands {
        PlanCommands::Show => match credentials.get_plan().await {
            Some(plan) => {
                print_fields(vec![
                    FieldRow::new("plan_id", plan.plan_id),
                    FieldRow::new("plan_timestamp", plan.plan_timestamp),
                ])?;
            }
            None => println!("no active plan"),
        },
        PlanCommands::Set { plan_id } => {
            debug!("[plan:set] plan_id: {plan_id}");
            ensure_saved(credentials.set_plan(&plan_id).await, "plan_id")?;
        }
        PlanCommands::Clear => {
            debug!("[plan:clear] triggered...");
            ensure_saved(credentials.set_plan("").await, "plan_id")?;
        }
        PlanCommands::Remove => {
            debug!("[plan:remove] triggered...");

            if credentials.remove_plan().await {
                info!("[plan:remove] plan removed");
            } else {
                info!("[plan:remove] nothing to remove");
            }
        }
    }

    Ok(())
}
