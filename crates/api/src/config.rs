//! Application configuration

use std::{env, str::FromStr, time::Duration};

/// How requests are mapped to tenants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Tenant chosen by subdomain or custom domain
    Multi,
    /// One workspace serves every host
    Single,
}

impl FromStr for HostMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multi" => Ok(Self::Multi),
            "single" => Ok(Self::Single),
            _ => Err(ConfigError::Invalid("HOST_MODE must be 'multi' or 'single'")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid("LOG_FORMAT must be 'pretty' or 'json'")),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub log_format: LogFormat,

    // Tenancy
    pub host_mode: HostMode,
    pub base_domain: String, // e.g., "test.fider.io" for *.test.fider.io routing
    pub login_host: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub tenant_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_mode: HostMode = env::var("HOST_MODE")
            .unwrap_or_else(|_| "multi".to_string())
            .parse()?;

        let base_domain = env::var("BASE_DOMAIN")
            .unwrap_or_else(|_| "localhost".to_string())
            .trim()
            .trim_end_matches('.')
            .to_ascii_lowercase();
        if host_mode == HostMode::Multi && base_domain.is_empty() {
            return Err(ConfigError::Invalid("BASE_DOMAIN is required in multi host mode"));
        }

        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse()?,

            // Tenancy
            host_mode,
            login_host: env::var("LOGIN_HOST").unwrap_or_else(|_| format!("login.{}", base_domain)),
            base_domain,

            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            tenant_cache_ttl: Duration::from_secs(
                env::var("TENANT_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
            ),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
