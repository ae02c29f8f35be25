//! Directory access
//!
//! The seam between the credential validator and a directory server. A
//! connector opens one transient session per validation; the session
//! performs a single simple bind and is then released.

pub mod ldap;
pub mod session;

pub use ldap::{LdapConnector, LdapSession};
pub use session::ScopedSession;

use crate::error::DirectoryError;

/// LDAP result code for `invalidCredentials` (RFC 4511, appendix A).
pub const INVALID_CREDENTIALS: u32 = 49;

/// Result reported by the server for a bind request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    Accepted,
    /// Any non-zero LDAP result code.
    Rejected { code: u32 },
}

impl BindStatus {
    /// Classify a raw LDAP result code.
    pub fn from_code(code: u32) -> Self {
        if code == 0 {
            BindStatus::Accepted
        } else {
            BindStatus::Rejected { code }
        }
    }
}

/// Opens transient sessions against a directory endpoint.
#[async_trait::async_trait]
pub trait DirectoryConnector: Send + Sync {
    type Session: DirectorySession + 'static;

    /// Establish a new session. Nothing is allocated when this fails.
    async fn open(&self) -> Result<Self::Session, DirectoryError>;
}

/// One open connection to the directory, owned by a single validation.
#[async_trait::async_trait]
pub trait DirectorySession: Send {
    /// Perform a simple bind with `principal` and `password` as given.
    async fn simple_bind(
        &mut self,
        principal: &str,
        password: &str,
    ) -> Result<BindStatus, DirectoryError>;

    /// Close the session. Called at most once.
    async fn release(&mut self) -> Result<(), DirectoryError>;
}
