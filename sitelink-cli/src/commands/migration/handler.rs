use rst_common::with_logging::log::debug;

use sitelink_core::connect::types::CredentialUsecaseBuilder;

use crate::commands::ensure_saved;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::render_membership;

use super::MigrationCommands;

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: MigrationCommands,
) -> Result<(), CliError> {
    debug!("[migration] command handler triggered...");
    let credentials = &ctx.services().credentials;

    match commands {
        MigrationCommands::Set { group_uuid } => {
            debug!("[migration:set] group_uuid: {group_uuid}");
            ensure_saved(
                credentials.set_migration_group(group_uuid).await,
                "group_uuid",
            )?;
        }
        MigrationCommands::Check { group_uuid } => {
            let member = credentials.has_migration_group(&group_uuid).await;
            println!("{}", render_membership(&group_uuid, member));
        }
    }

    Ok(())
}
