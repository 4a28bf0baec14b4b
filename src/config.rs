//! Server configuration loaded from environment variables.
//!
//! - `XATA_API_KEY` - Provider API key (required)
//! - `XATA_BRANCH` - Provider branch (default: `main`)
//! - `ASKYOURSTACK_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)
//! - `ASKYOURSTACK_RATE_LIMIT` - Requests per minute per client IP (default: unlimited)

use thiserror::Error;

use crate::provider::DEFAULT_BRANCH;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub branch: String,
    pub cors_origins: Option<Vec<String>>,
    /// Requests per minute per client IP.
    pub rate_limit: Option<u32>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("XATA_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("XATA_API_KEY"))?;

        let branch = lookup("XATA_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        let cors_origins = lookup("ASKYOURSTACK_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let rate_limit = match lookup("ASKYOURSTACK_RATE_LIMIT") {
            Some(value) => Some(value.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                name: "ASKYOURSTACK_RATE_LIMIT",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            api_key,
            branch,
            cors_origins,
            rate_limit,
        })
    }
}
