//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where the catalog lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown store backend '{other}' (expected 'sqlite' or 'memory')"),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog storage backend: "sqlite" or "memory"
    pub store_backend: StoreBackend,
    /// SQLite connection URL (if using sqlite backend)
    pub database_url: String,

    pub server_host: String,
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any)
    pub cors_allowed_origins: Vec<String>,

    /// Write the starter catalog into empty tables on startup
    pub seed_data: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            store_backend: var("STORE_BACKEND", "sqlite")
                .parse()
                .context("STORE_BACKEND must be 'sqlite' or 'memory'")?,
            database_url: var("DATABASE_URL", "sqlite://heroes.db"),

            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: var("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS", "http://localhost:4200")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            seed_data: var("SEED_DATA", "true")
                .trim()
                .parse()
                .context("SEED_DATA must be 'true' or 'false'")?,
        })
    }
}
