//! Host configuration loaded from the environment.

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use tenantscope_core::Identity;
use tenantscope_observability::{LogFormat, UnknownLogFormat};

pub const BIND_ADDR_VAR: &str = "TENANTSCOPE_BIND_ADDR";
pub const IDENTITY_HEADER_VAR: &str = "TENANTSCOPE_IDENTITY_HEADER";
pub const ADMINS_VAR: &str = "TENANTSCOPE_ADMINS";
pub const LOG_FORMAT_VAR: &str = "TENANTSCOPE_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TENANTSCOPE_BIND_ADDR '{0}'")]
    BindAddr(String),

    #[error("invalid TENANTSCOPE_IDENTITY_HEADER '{0}'")]
    IdentityHeader(String),

    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
}

/// Runtime settings of the HTTP host.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Header carrying the identity resolved by the upstream session layer.
    pub identity_header: HeaderName,
    /// Identities allowed to request ownership bypass.
    pub admins: HashSet<Identity>,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            identity_header: HeaderName::from_static("x-user-id"),
            admins: HashSet::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = raw.trim().parse().map_err(|_| ConfigError::BindAddr(raw))?;
        }
        if let Some(raw) = lookup(IDENTITY_HEADER_VAR) {
            config.identity_header =
                raw.trim().parse().map_err(|_| ConfigError::IdentityHeader(raw))?;
        }
        if let Some(raw) = lookup(ADMINS_VAR) {
            config.admins = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Identity::from)
                .collect();
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        if config.admins.is_empty() {
            tracing::debug!("no admins configured; ownership bypass is unavailable");
        }
        Ok(config)
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.admins.contains(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.identity_header.as_str(), "x-user-id");
        assert!(config.admins.is_empty());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_every_setting() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (IDENTITY_HEADER_VAR, "x-session-user"),
            (ADMINS_VAR, " root, ops ,,"),
            (LOG_FORMAT_VAR, "compact"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.identity_header.as_str(), "x-session-user");
        assert!(config.is_admin(&Identity::from("root")));
        assert!(config.is_admin(&Identity::from("ops")));
        assert_eq!(config.admins.len(), 2);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "nowhere")])),
            Err(ConfigError::BindAddr(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(IDENTITY_HEADER_VAR, "bad header")])),
            Err(ConfigError::IdentityHeader(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])),
            Err(ConfigError::LogFormat(_))
        ));
    }
}
