//! Credential validator
//!
//! Authenticates a username/password pair with a single simple bind.
//! Every failure, whatever its cause, yields `false`: callers learn only
//! whether the login succeeded, never why it did not.

use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};

use super::credentials::Credentials;
use super::principal::BindPrincipal;
use super::results::BindOutcome;
use crate::config::DirectoryConfig;
use crate::directory::{DirectoryConnector, INVALID_CREDENTIALS, LdapConnector, ScopedSession};
use crate::error::DirectoryError;

/// Validates credentials against a directory, one session per call.
pub struct CredentialValidator<C: DirectoryConnector = LdapConnector> {
    connector: C,
    domain_suffix: String,
    bind_timeout: Duration,
}

impl CredentialValidator<LdapConnector> {
    /// Validator for the LDAP endpoint described by `config`.
    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::with_connector(
            LdapConnector::from_config(config),
            config.domain_suffix.clone(),
            config.bind_timeout(),
        )
    }
}

impl<C: DirectoryConnector> CredentialValidator<C> {
    pub fn with_connector(
        connector: C,
        domain_suffix: impl Into<String>,
        bind_timeout: Duration,
    ) -> Self {
        Self {
            connector,
            domain_suffix: domain_suffix.into(),
            bind_timeout,
        }
    }

    /// Principal that a bind for `username` would present.
    pub fn principal_for(&self, username: &str) -> BindPrincipal {
        BindPrincipal::new(username, &self.domain_suffix)
    }

    /// Returns `true` only if the directory accepts the bind.
    pub async fn validate(&self, username: &str, password: &str) -> bool {
        let principal = self.principal_for(username);

        let mut session = match self.connector.open().await {
            Ok(session) => ScopedSession::new(session),
            Err(e) => {
                warn!("Directory session for {} could not be opened: {}", principal, e);
                return false;
            }
        };

        let outcome = self.attempt_bind(&mut session, &principal, password).await;
        session.release().await;

        match &outcome {
            BindOutcome::Accepted => info!("Bind accepted for {}", principal),
            BindOutcome::Rejected { code } => {
                info!("Bind rejected for {} (result code {})", principal, code)
            }
            BindOutcome::Failed(e) => warn!("Bind for {} failed: {}", principal, e),
        }

        outcome.is_authenticated()
    }

    /// Same as [`validate`](Self::validate), taking ownership of the input.
    pub async fn validate_credentials(&self, credentials: Credentials) -> bool {
        self.validate(credentials.username(), credentials.password())
            .await
    }

    /// Blocking variant for synchronous callers.
    ///
    /// Outside a runtime this runs on a private current-thread runtime.
    /// Inside a multi-thread runtime the worker is handed over with
    /// `block_in_place`; a current-thread runtime cannot block, so the
    /// call fails closed.
    pub fn validate_blocking(&self, username: &str, password: &str) -> bool {
        if let Ok(handle) = Handle::try_current() {
            return match handle.runtime_flavor() {
                RuntimeFlavor::MultiThread => tokio::task::block_in_place(|| {
                    handle.block_on(self.validate(username, password))
                }),
                _ => {
                    error!("Blocking credential validation called on a current-thread runtime");
                    false
                }
            };
        }

        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.validate(username, password)),
            Err(e) => {
                error!("Failed to start runtime for credential validation: {}", e);
                false
            }
        }
    }

    async fn attempt_bind(
        &self,
        session: &mut ScopedSession<C::Session>,
        principal: &BindPrincipal,
        password: &str,
    ) -> BindOutcome {
        // An empty password turns a simple bind into an unauthenticated bind,
        // which servers report as success.
        if password.is_empty() {
            debug!("Empty password for {}, bind not sent", principal);
            return BindOutcome::Rejected {
                code: INVALID_CREDENTIALS,
            };
        }

        match tokio::time::timeout(
            self.bind_timeout,
            session.simple_bind(principal.as_str(), password),
        )
        .await
        {
            Ok(result) => BindOutcome::from(result),
            Err(_) => BindOutcome::Failed(DirectoryError::Timeout(self.bind_timeout)),
        }
    }
}
