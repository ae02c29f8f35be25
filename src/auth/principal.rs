//! Bind principal construction

use std::fmt;

/// UPN-style identity presented during bind: `lowercase(username)@suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindPrincipal(String);

impl BindPrincipal {
    /// The suffix is appended as configured; only the username is folded.
    pub fn new(username: &str, domain_suffix: &str) -> Self {
        Self(format!("{}@{}", username.to_lowercase(), domain_suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BindPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
