//! Backend settings.

use std::time::Duration;

use crate::config::{
    env_bool, env_list, env_lookup, env_required, env_u64, ConfigError, Lookup,
};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_CORS_ORIGIN: &str = "https://movie-corner-frontend-sage.vercel.app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub log_json: bool,
}

impl ServerConfig {
    /// Settings with defaults for everything but the signing secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: jwt_secret.into(),
            jwt_ttl: Duration::from_secs(3600),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            log_json: false,
        }
    }

    /// `PORT`, `JWT_SECRET` (required), `JWT_TTL_SECS`, `BCRYPT_COST`,
    /// `CORS_ORIGINS` (comma separated) and `LOG_JSON`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let port = env_u64(lookup, "PORT", u64::from(DEFAULT_PORT))?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port.to_string(),
        })?;

        let cost = env_u64(lookup, "BCRYPT_COST", u64::from(DEFAULT_BCRYPT_COST))?;
        if !(4..=31).contains(&cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: cost.to_string(),
            });
        }

        Ok(Self {
            port,
            jwt_secret: env_required(lookup, "JWT_SECRET")?,
            jwt_ttl: Duration::from_secs(env_u64(lookup, "JWT_TTL_SECS", 3600)?),
            bcrypt_cost: cost as u32,
            cors_origins: env_list(lookup, "CORS_ORIGINS", &[DEFAULT_CORS_ORIGIN]),
            log_json: env_bool(lookup, "LOG_JSON", false),
        })
    }
}
