//! Environment configuration.

use std::env;
use std::path::PathBuf;

/// Deployment platform flag. Only `dev` unlocks the admin reset endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to (`LISTEN_ADDR`).
    pub listen_addr: String,
    /// Postgres connection string (`DB_URL`); absent means in-memory store.
    pub database_url: Option<String>,
    /// Deployment platform (`PLATFORM`); anything but `dev` is production.
    pub platform: Platform,
    /// Directory served under `/app/*` (`ASSET_ROOT`).
    pub asset_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let database_url = env::var("DB_URL").ok();

        let platform = match env::var("PLATFORM").as_deref() {
            Ok("dev") => Platform::Dev,
            Ok(other) => {
                tracing::warn!(platform = other, "unrecognized PLATFORM; treating as prod");
                Platform::Prod
            }
            Err(_) => Platform::Prod,
        };

        let asset_root = env::var("ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            listen_addr,
            database_url,
            platform,
            asset_root,
        }
    }
}
