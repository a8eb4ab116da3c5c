pub mod config;
pub mod homedir;
pub mod output;
