//! Server configuration loaded from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rootpilot_auth::AuthConfig;
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is not set. Only suitable for
/// local development.
pub const DEV_JWT_SECRET: &str = "rootpilot-development-secret-change-me";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5000);

/// Longest accepted token lifetime (ten years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    /// Report ownership failures as NotFound so non-owners cannot discover
    /// which ids exist.
    pub conceal_foreign_resources: bool,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            auth: AuthConfig {
                jwt_secret: DEV_JWT_SECRET.into(),
                ..AuthConfig::default()
            },
            conceal_foreign_resources: false,
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys fall back
    /// to defaults; set-but-unparsable keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "ROOTPILOT_BIND_ADDR")?
            .unwrap_or(defaults.bind_addr);
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_JWT_SECRET.into());
        let token_lifetime_secs = parse_var(&lookup, "ROOTPILOT_TOKEN_TTL_SECS")?
            .unwrap_or(defaults.auth.token_lifetime_secs);
        let pepper = lookup("ROOTPILOT_PASSWORD_PEPPER").filter(|s| !s.is_empty());
        let min_password_length = parse_var(&lookup, "ROOTPILOT_MIN_PASSWORD_LENGTH")?
            .unwrap_or(defaults.auth.min_password_length);
        let conceal_foreign_resources = match lookup("ROOTPILOT_CONCEAL_FOREIGN") {
            Some(raw) => parse_flag("ROOTPILOT_CONCEAL_FOREIGN", &raw)?,
            None => defaults.conceal_foreign_resources,
        };
        let log_json = match lookup("ROOTPILOT_LOG_FORMAT") {
            Some(raw) => parse_log_format(&raw)?,
            None => defaults.log_json,
        };

        if token_lifetime_secs == 0 || token_lifetime_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::Invalid {
                var: "ROOTPILOT_TOKEN_TTL_SECS",
                value: token_lifetime_secs.to_string(),
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_SECS}"),
            });
        }

        Ok(Self {
            bind_addr,
            auth: AuthConfig {
                jwt_secret,
                token_lifetime_secs,
                pepper,
                min_password_length,
                ..defaults.auth
            },
            conceal_foreign_resources,
            log_json,
        })
    }

    pub fn uses_development_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.into(),
            reason: "expected true or false".into(),
        }),
    }
}

fn parse_log_format(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(true),
        "text" | "pretty" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var: "ROOTPILOT_LOG_FORMAT",
            value: raw.into(),
            reason: "expected json or text".into(),
        }),
    }
}
