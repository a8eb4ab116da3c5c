use rst_common::with_logging::log::{debug, info};

use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::TokenCommands;

pub async fn handle_commands(ctx: &ContextHandler, commands: TokenCommands) -> Result<(), CliError> {
    debug!("[token] command handler triggered...");

    match commands {
        TokenCommands::Refresh { connect_id } => {
            debug!("[token:refresh] connect_id: {:?}", connect_id);

            let refresher = ctx
                .services()
                .build_refresher()
                .await
                .map_err(|err| CliError::TokenError(err.to_string()))?;

            if !refresher.refresh(connect_id).await {
                return Err(CliError::TokenError(
                    "token refresh failed, check the error log".to_string(),
                ));
            }

            info!("[token:refresh] token refreshed");
        }
    }

    Ok(())
}
