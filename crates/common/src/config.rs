//! Application configuration.

use chrono::Duration;
use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Email verification configuration.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
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
    /// Public URL of the web client, used when a request has no `Origin`.
    pub url: String,
}

/// Database connection configuration.
///
/// The URL carries the privileged role credentials the server writes with.
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

/// Bearer token verification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider.
    pub jwt_secret: String,
    /// Expected `aud` claim, if the provider sets one.
    #[serde(default)]
    pub audience: Option<String>,
}

/// Email verification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// How long an issued token can be redeemed.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl VerificationConfig {
    /// Token lifetime. Rejects zero, negative and out-of-range hour counts.
    pub fn token_ttl(&self) -> AppResult<Duration> {
        let hours = self.token_ttl_hours;
        if hours <= 0 {
            return Err(AppError::Config(format!(
                "verification.token_ttl_hours must be positive, got {hours}"
            )));
        }

        Duration::try_hours(hours).ok_or_else(|| {
            AppError::Config(format!(
                "verification.token_ttl_hours is out of range: {hours}"
            ))
        })
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_token_ttl_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, only to populate the environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `BIZFEED_ENV`)
    /// 4. Environment variables with `BIZFEED_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("BIZFEED_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BIZFEED")
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
                config::Environment::with_prefix("BIZFEED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Public client URL without a trailing slash.
    #[must_use]
    pub fn public_origin(&self) -> String {
        self.server.url.trim_end_matches('/').to_string()
    }
}
