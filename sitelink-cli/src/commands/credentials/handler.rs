use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, info};

use sitelink_core::connect::types::CredentialUsecaseBuilder;

use crate::commands::ensure_saved;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::{mask_secret, print_fields, render_hashed_key, FieldRow};

use super::CredentialsCommands;

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: CredentialsCommands,
) -> Result<(), CliError> {
    debug!("[credentials] command handler triggered...");
    let credentials = &ctx.services().credentials;

    match commands {
        CredentialsCommands::Show => {
            debug!("[credentials:show] triggered...");

            let plan = credentials.get_plan().await;
            let rows = vec![
                FieldRow::new("api_key", mask_secret(&credentials.get_api_key().await)),
                FieldRow::new("connect_id", credentials.get_connect_id().await.to_string()),
                FieldRow::new("connect_uuid", credentials.get_connect_uuid().await),
                FieldRow::new("origin", credentials.get_origin().await),
                FieldRow::new("jwt", mask_secret(&credentials.get_jwt().await)),
                FieldRow::new("api_url", credentials.get_api_url().await),
                FieldRow::new("group_uuid", credentials.get_migration_group().await),
                FieldRow::new(
                    "plan_id",
                    plan.map(|plan| plan.plan_id).unwrap_or_default(),
                ),
            ];

            print_fields(rows)?;
        }
        CredentialsCommands::SetApiKey { api_key } => {
            debug!("[credentials:set-api-key] triggered...");
            ensure_saved(credentials.set_api_key(api_key).await, "api_key")?;
        }
        CredentialsCommands::SetConnectId { connect_id } => {
            debug!("[credentials:set-connect-id] connect_id: {connect_id}");
            ensure_saved(
                credentials.set_connect_id(Value::String(connect_id)).await,
                "connect_id",
            )?;

            info!(
                "[credentials:set-connect-id] stored connect id: {}",
                credentials.get_connect_id().await
            );
        }
        CredentialsCommands::SetUuid { connect_uuid } => {
            debug!("[credentials:set-uuid] connect_uuid: {connect_uuid}");
            ensure_saved(credentials.set_connect_uuid(connect_uuid).await, "connect_uuid")?;
        }
        CredentialsCommands::SetOrigin { origin } => {
            debug!("[credentials:set-origin] origin: {origin}");
            ensure_saved(credentials.set_origin(origin).await, "origin")?;
        }
        CredentialsCommands::SetJwt { jwt } => {
            debug!("[credentials:set-jwt] triggered...");
            ensure_saved(credentials.set_jwt(jwt).await, "jwt")?;
        }
        CredentialsCommands::SetApiUrl { api_url } => {
            debug!("[credentials:set-api-url] api_url: {api_url}");
            ensure_saved(credentials.set_api_url(api_url).await, "api_url")?;
        }
        CredentialsCommands::HashedKey => {
            debug!("[credentials:hashed-key] triggered...");

            let hashed = credentials.get_hashed_api_key().await;
            println!("{}", render_hashed_key(&hashed));
        }
    }

    Ok(())
}
