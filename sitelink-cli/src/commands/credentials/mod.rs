use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as credentials_handler;

#[derive(Args, Clone)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub commands: CredentialsCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Credentials")]
pub enum CredentialsCommands {
    /// Print the stored credential record
    Show,

    #[command(name = "set-api-key")]
    SetApiKey { api_key: String },

    #[command(name = "set-connect-id")]
    SetConnectId { connect_id: String },

    #[command(name = "set-uuid")]
    SetUuid { connect_uuid: String },

    #[command(name = "set-origin")]
    SetOrigin { origin: String },

    #[command(name = "set-jwt")]
    SetJwt { jwt: String },

    #[command(name = "set-api-url")]
    SetApiUrl { api_url: String },

    /// Print the SHA-256 of the api key secret
    #[command(name = "hashed-key")]
    HashedKey,
}
