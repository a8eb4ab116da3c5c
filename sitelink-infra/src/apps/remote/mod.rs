mod client;
pub use client::HttpRemoteClient;
