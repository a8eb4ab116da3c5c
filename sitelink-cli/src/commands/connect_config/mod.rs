use clap::Args;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use sitelink_core::connect::types::HostEnvironmentBuilder;
use sitelink_core::connect::{build_connect_config, ConfigOverride};

use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::to_pretty_json;

#[derive(Args, Clone)]
pub struct ConnectConfigArgs {
    /// Mark the site as not managed by the remote service
    #[arg(long)]
    pub unmanaged: bool,
}

pub fn connect_config_handler(
    ctx: &ContextHandler,
    args: ConnectConfigArgs,
) -> Result<(), CliError> {
    debug!("[connect-config] unmanaged: {}", args.unmanaged);

    let output = render_connect_config(&ctx.services().host, args.unmanaged)?;
    println!("{}", output);
    Ok(())
}

fn render_connect_config<THost: HostEnvironmentBuilder>(
    host: &THost,
    unmanaged: bool,
) -> Result<String, CliError> {
    let overrides = ConfigOverride::Managed(!unmanaged && host.is_managed());
    let config = build_connect_config(host, overrides);
    to_pretty_json(&Value::Object(config))
}
