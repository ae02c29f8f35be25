//! Configuration management for the credential validator
//!
//! The directory endpoint and the realm appended to bare usernames are
//! deployment concerns: they come from an optional TOML file and
//! `LDAP_AUTH_` prefixed environment variables, never from user input.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::net::Ipv6Addr;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Default configuration file, looked up in the working directory.
const DEFAULT_CONFIG_NAME: &str = "ldap-auth";

/// Environment prefix, e.g. `LDAP_AUTH_DOMAIN_SUFFIX`.
const ENV_PREFIX: &str = "LDAP_AUTH";

/// Directory endpoint and principal construction settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Directory server host name or IP address
    #[serde(default = "default_host")]
    pub host: String,

    /// Directory server port (plaintext LDAP)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Realm appended to the lowercased username, e.g. `corp.example.com`
    pub domain_suffix: String,

    /// Upper bound on establishing the TCP session
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on the bind round trip
    #[serde(default = "default_timeout_secs")]
    pub bind_timeout_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    389
}

fn default_timeout_secs() -> u64 {
    5
}

impl DirectoryConfig {
    /// Build a configuration in code, with default timeouts.
    pub fn new(host: impl Into<String>, port: u16, domain_suffix: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            domain_suffix: domain_suffix.into(),
            connect_timeout_secs: default_timeout_secs(),
            bind_timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from `ldap-auth.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false));
        Self::build(builder)
    }

    /// Load configuration from an explicit file with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from(path));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: DirectoryConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid("port cannot be 0".into()));
        }

        if self.domain_suffix.is_empty() {
            return Err(ConfigError::Invalid("domain_suffix cannot be empty".into()));
        }

        if self.domain_suffix.contains('@') || self.domain_suffix.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "domain_suffix '{}' must not contain '@' or whitespace",
                self.domain_suffix
            )));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.bind_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "bind_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Directory URL in the form `ldap://host:port`, IPv6 literals bracketed
    pub fn url(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("ldap://[{}]:{}", self.host, self.port)
        } else {
            format!("ldap://{}:{}", self.host, self.port)
        }
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get bind timeout as Duration
    pub fn bind_timeout(&self) -> Duration {
        Duration::from_secs(self.bind_timeout_secs)
    }
}
