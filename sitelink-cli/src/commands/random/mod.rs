use clap::Args;
use rst_common::with_logging::log::warn;

use sitelink_core::entropy::{random_string, EntropySource};

use crate::types::CliError;

#[derive(Args, Clone)]
pub struct RandomArgs {
    /// Number of hex characters to generate
    #[arg(long, default_value_t = 6)]
    pub length: usize,
}

pub fn random_handler(args: RandomArgs) -> Result<(), CliError> {
    let out = random_string(args.length);
    if out.source == EntropySource::Fallback {
        warn!("[random] system entropy unavailable, value derived from a uuid");
    }

    println!("{}", out.value);
    Ok(())
}
