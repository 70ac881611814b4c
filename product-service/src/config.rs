//! Configuration management using Figment
//!
//! Sources, lowest to highest precedence:
//! 1. Default values
//! 2. `./config.toml` (or the path given to [`Config::load_from`])
//! 3. Environment variables prefixed with `PRODUCT_`, nested with `__`
//!    (e.g. `PRODUCT_DATABASE__MAX_CONNECTIONS=20`)
//! 4. Deployment variables: `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
//!    `DB_NAME` and `PORT`
//!
//! A deployment variable that is set but empty still counts as set.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::Result;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "PRODUCT_";

// (variable, config key, is a port)
const DEPLOYMENT_VARS: &[(&str, &str, bool)] = &[
    ("DB_HOST", "database.host", false),
    ("DB_PORT", "database.port", true),
    ("DB_USER", "database.user", false),
    ("DB_PASSWORD", "database.password", false),
    ("DB_NAME", "database.name", false),
    ("PORT", "service.port", true),
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// HTTP middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

/// PostgreSQL configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default = "default_db_password")]
    pub password: String,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Connection attempts after the first one fails
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts, doubled after each failure
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl DatabaseConfig {
    /// Connection options with TLS disabled
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }

    /// `user@host:port/name`, safe to log
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: default_db_password(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

// Manual Debug so the password never reaches logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .finish()
    }
}

fn default_service_name() -> String {
    "product-service".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_body_limit_mb() -> usize {
    10
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_password() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "products".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

impl Config {
    /// Load configuration from `./config.toml` and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file and the process environment
    ///
    /// A missing file is not an error; defaults and the environment still apply.
    pub fn load_from(path: &str) -> Result<Self> {
        Self::load_with(path, |var| std::env::var(var).ok())
    }

    /// Load configuration, resolving deployment variables through `lookup`
    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(deployment_overrides(lookup))
            .extract()?;

        Ok(config)
    }
}

fn deployment_overrides<F>(lookup: F) -> Figment
where
    F: Fn(&str) -> Option<String>,
{
    let mut figment = Figment::new();

    for (var, key, is_port) in DEPLOYMENT_VARS {
        let Some(value) = lookup(var) else {
            continue;
        };

        if *is_port {
            match value.trim().parse::<u16>() {
                Ok(port) => figment = figment.merge(Serialized::default(key, port)),
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", var, value, e),
            }
        } else {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    figment
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: default_service_name(),
                port: default_port(),
                log_level: default_log_level(),
                environment: default_environment(),
            },
            middleware: MiddlewareConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}
