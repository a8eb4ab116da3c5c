use std::process;

use clap::{Parser, Subcommand};
use rst_common::with_logging::log::{debug, error};
use rst_common::with_tokio::tokio;
use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

use sitelink_infra::Sitelink;

use sitelink_cli::commands::connect_config::{connect_config_handler, ConnectConfigArgs};
use sitelink_cli::commands::credentials::{credentials_handler, CredentialsArgs};
use sitelink_cli::commands::handler::ContextHandler;
use sitelink_cli::commands::log::{log_handler, LogArgs};
use sitelink_cli::commands::migration::{migration_handler, MigrationArgs};
use sitelink_cli::commands::plan::{plan_handler, PlanArgs};
use sitelink_cli::commands::random::{random_handler, RandomArgs};
use sitelink_cli::commands::token::{token_handler, TokenArgs};
use sitelink_cli::types::{CliError, SITELINK_DEFAULT_DIR};
use sitelink_cli::utils::config::load_config;
use sitelink_cli::utils::homedir::setup_homedir;

#[derive(Parser)]
#[command(name = "sitelink")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
struct Cli {
    /// Path to a TOML config file, defaults to ~/.sitelink/config.toml
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored connection credentials
    Credentials(CredentialsArgs),

    /// Manage the active plan
    Plan(PlanArgs),

    /// Manage the migration group
    Migration(MigrationArgs),

    /// Refresh the short lived token
    Token(TokenArgs),

    /// Read or append the persisted error log
    Log(LogArgs),

    /// Generate a random hex identifier
    Random(RandomArgs),

    /// Print the payload describing this site
    #[command(name = "connect-config")]
    ConnectConfig(ConnectConfigArgs),
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}={level},sitelink_cli={level},sitelink_core={level},sitelink_infra={level}",
                    crate_name = env!("CARGO_CRATE_NAME"),
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Random(args) = cli.commands {
        return random_handler(args);
    }

    let sitelink_dir = setup_homedir(SITELINK_DEFAULT_DIR)?;
    let config = load_config(cli.config, &sitelink_dir)?;

    let services = Sitelink::from_config(config)
        .and_then(|sitelink| sitelink.build())
        .map_err(|err| CliError::ConfigError(err.to_string()))?;

    let ctx = ContextHandler::new(services);

    match cli.commands {
        Commands::Credentials(args) => credentials_handler(&ctx, args.commands).await,
        Commands::Plan(args) => plan_handler(&ctx, args.commands).await,
        Commands::Migration(args) => migration_handler(&ctx, args.commands).await,
        Commands::Token(args) => token_handler(&ctx, args.commands).await,
        Commands::Log(args) => log_handler(&ctx, args.commands).await,
        Commands::ConnectConfig(args) => connect_config_handler(&ctx, args),
        Commands::Random(args) => random_handler(args),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    debug!("[main] sitelink cli started");

    if let Err(err) = run(cli).await {
        error!("{}", err);
        process::exit(1);
    }
}
