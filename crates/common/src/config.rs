//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Data retention configuration.
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Data retention configuration for the scheduled jobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionConfig {
    /// Grace period between scheduling an account deletion and the jobs
    /// picking it up, in days.
    #[serde(default = "default_grace_days")]
    pub grace_period_days: i64,
    /// Hour of day (UTC) at which form submissions are purged.
    #[serde(default = "default_purge_hour")]
    pub purge_hour: u32,
    /// Hour of day (UTC) at which departed users are anonymized.
    #[serde(default = "default_anonymize_hour")]
    pub anonymize_hour: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            grace_period_days: default_grace_days(),
            purge_hour: default_purge_hour(),
            anonymize_hour: default_anonymize_hour(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_grace_days() -> i64 {
    3
}

const fn default_purge_hour() -> u32 {
    0
}

const fn default_anonymize_hour() -> u32 {
    1
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `HUB_ENV`)
    /// 3. Environment variables with `HUB_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("HUB_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("HUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
