//! LDAP directory connector
//!
//! Plaintext LDAP sessions on top of the `ldap3` async client.

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings};
use log::debug;
use std::time::Duration;

use super::{BindStatus, DirectoryConnector, DirectorySession};
use crate::config::DirectoryConfig;
use crate::error::DirectoryError;

/// Opens one `ldap3` connection per session.
#[derive(Debug, Clone)]
pub struct LdapConnector {
    url: String,
    connect_timeout: Duration,
}

impl LdapConnector {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(config.url(), config.connect_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DirectoryConnector for LdapConnector {
    type Session = LdapSession;

    async fn open(&self) -> Result<LdapSession, DirectoryError> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.connect_timeout);

        debug!("Connecting to directory at {}", self.url);

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &self.url)
            .await
            .map_err(|e| DirectoryError::Connect(format!("{}: {}", self.url, e)))?;

        // The connection task exits once the session handle unbinds or is dropped.
        let url = self.url.clone();
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                debug!("Directory connection to {} ended with error: {}", url, e);
            }
        });

        Ok(LdapSession { ldap })
    }
}

/// An open `ldap3` session handle
pub struct LdapSession {
    ldap: Ldap,
}

#[async_trait]
impl DirectorySession for LdapSession {
    async fn simple_bind(
        &mut self,
        principal: &str,
        password: &str,
    ) -> Result<BindStatus, DirectoryError> {
        let result = self.ldap.simple_bind(principal, password).await?;
        Ok(BindStatus::from_code(result.rc))
    }

    async fn release(&mut self) -> Result<(), DirectoryError> {
        self.ldap
            .unbind()
            .await
            .map_err(|e| DirectoryError::Release(e.to_string()))
    }
}
