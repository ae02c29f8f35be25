//! Bind-based credential validation against an LDAP directory.
//!
//! ```no_run
//! use rax_ldap_auth::{CredentialValidator, DirectoryConfig};
//!
//! # async fn login() {
//! let config = DirectoryConfig::new("dc01.corp.example.com", 389, "corp.example.com");
//! let validator = CredentialValidator::from_config(&config);
//!
//! if validator.validate("alice", "correctpassword").await {
//!     // establish the application session
//! }
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod utils;

pub use auth::{Credentials, CredentialValidator};
pub use config::DirectoryConfig;
