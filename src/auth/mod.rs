//! Authentication system
//!
//! Validates username/password pairs by binding against a directory.

pub mod credentials;
pub mod principal;
pub mod results;
pub mod validator;

pub use credentials::Credentials;
pub use principal::BindPrincipal;
pub use results::BindOutcome;
pub use validator::CredentialValidator;
