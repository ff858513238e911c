//! Connection settings for the projects service.

use std::env;

use crate::error::ConfigError;

pub const HOST_VAR: &str = "WEBODM_HOST";
pub const TOKEN_VAR: &str = "WEBODM_TOKEN";

/// Base host and API token, fixed for the lifetime of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    host: String,
    token: String,
}

impl ServiceConfig {
    /// Validate and normalise `host` (trailing slashes are dropped).
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let trimmed = host.trim().trim_end_matches('/');
        let has_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_scheme {
            return Err(ConfigError::InvalidHost(host));
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        Ok(Self {
            host: trimmed.to_string(),
            token,
        })
    }

    /// Read `WEBODM_HOST` and `WEBODM_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_VAR).ok_or(ConfigError::MissingVar(HOST_VAR))?;
        let token = lookup(TOKEN_VAR).ok_or(ConfigError::MissingVar(TOKEN_VAR))?;
        Self::new(host, token)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
