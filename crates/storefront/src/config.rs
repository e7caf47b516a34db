//! Configuration management for the storefront.
//!
//! Loads configuration from environment variables with sensible defaults. Malformed
//! values are an error rather than silently replaced.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Secret used when `JWT_SECRET` is unset. Fine for local runs only.
pub const DEV_JWT_SECRET: &str = "storefront-dev-secret";

/// Longest session either kind of principal may be given, one year.
pub const MAX_SESSION_HOURS: i64 = 24 * 366;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to (`STOREFRONT_BIND`)
    pub bind: SocketAddr,
    /// Secret for signing session claims (`JWT_SECRET`)
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Administrator session lifetime in hours (`ADMIN_SESSION_HOURS`)
    pub admin_session_hours: i64,
    /// Customer session lifetime in hours (`CUSTOMER_SESSION_HOURS`)
    pub customer_session_hours: i64,
    /// Where uploaded images are written (`UPLOAD_DIR`)
    pub upload_dir: PathBuf,
    /// Base URL clients reach the server at (`PUBLIC_BASE_URL`)
    pub public_base_url: String,
    /// Password of the seeded `admin` account (`SEED_ADMIN_PASSWORD`)
    #[serde(skip_serializing)]
    pub seed_admin_password: String,
    /// bcrypt work factor (`BCRYPT_COST`)
    pub bcrypt_cost: u32,
    /// Order status polling interval in seconds (`ORDER_POLL_SECS`)
    pub order_poll_secs: u64,
    /// Request channel capacity of each actor (`ACTOR_BUFFER`)
    pub actor_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            admin_session_hours: 10,
            customer_session_hours: 100,
            upload_dir: PathBuf::from("uploads"),
            public_base_url: "http://localhost:5000".to_string(),
            seed_admin_password: "password".to_string(),
            bcrypt_cost: 10,
            order_poll_secs: 5,
            actor_buffer: 32,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let config = Self {
            bind: parsed(&lookup, "STOREFRONT_BIND", defaults.bind)?,
            jwt_secret,
            admin_session_hours: parsed(&lookup, "ADMIN_SESSION_HOURS", defaults.admin_session_hours)?,
            customer_session_hours: parsed(&lookup, "CUSTOMER_SESSION_HOURS", defaults.customer_session_hours)?,
            upload_dir: lookup("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            seed_admin_password: lookup("SEED_ADMIN_PASSWORD").unwrap_or(defaults.seed_admin_password),
            bcrypt_cost: parsed(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?,
            order_poll_secs: parsed(&lookup, "ORDER_POLL_SECS", defaults.order_poll_secs)?,
            actor_buffer: parsed(&lookup, "ACTOR_BUFFER", defaults.actor_buffer)?,
        };

        if !(4..=31).contains(&config.bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", config.bcrypt_cost, "must be between 4 and 31"));
        }
        if config.actor_buffer == 0 {
            return Err(invalid("ACTOR_BUFFER", config.actor_buffer, "must be positive"));
        }
        if config.order_poll_secs == 0 {
            return Err(invalid("ORDER_POLL_SECS", config.order_poll_secs, "must be positive"));
        }
        for (var, hours) in [
            ("ADMIN_SESSION_HOURS", config.admin_session_hours),
            ("CUSTOMER_SESSION_HOURS", config.customer_session_hours),
        ] {
            if !(1..=MAX_SESSION_HOURS).contains(&hours) {
                return Err(invalid(var, hours, &format!("must be between 1 and {MAX_SESSION_HOURS}")));
            }
        }
        Ok(config)
    }

    pub fn admin_session_ttl(&self) -> chrono::Duration {
        session_ttl(self.admin_session_hours)
    }

    pub fn customer_session_ttl(&self) -> chrono::Duration {
        session_ttl(self.customer_session_hours)
    }

    pub fn order_poll_interval(&self) -> Duration {
        Duration::from_secs(self.order_poll_secs)
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Hours set directly on the struct skip `from_lookup`, so they are clamped here too.
fn session_ttl(hours: i64) -> chrono::Duration {
    chrono::Duration::hours(hours.clamp(1, MAX_SESSION_HOURS))
}

fn invalid(var: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
