//! Error types
//!
//! Defines the internal error types of the directory layer and the
//! configuration loader. None of these reach the caller of a validation:
//! the validator collapses every directory failure into a negative result.

use std::fmt;
use std::time::Duration;

/// Directory layer errors
#[derive(Debug)]
pub enum DirectoryError {
    /// The session could not be established (refused, unreachable, bad URL).
    Connect(String),
    /// An operation did not complete within its configured bound.
    Timeout(Duration),
    /// The server answered with something the client could not use.
    Protocol(String),
    /// Closing the session failed.
    Release(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Connect(msg) => write!(f, "Connection failed: {}", msg),
            DirectoryError::Timeout(after) => {
                write!(f, "Operation timed out after {}ms", after.as_millis())
            }
            DirectoryError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            DirectoryError::Release(msg) => write!(f, "Session release failed: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<ldap3::LdapError> for DirectoryError {
    fn from(error: ldap3::LdapError) -> Self {
        DirectoryError::Protocol(error.to_string())
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        ConfigError::Load(error)
    }
}
