//! Scoped directory session
//!
//! Owns an open session for the duration of one validation and makes sure
//! it is released on every exit path.

use log::debug;

use super::{BindStatus, DirectorySession};
use crate::error::DirectoryError;

/// An open session that is released exactly once.
///
/// The normal path calls [`ScopedSession::release`]. If the scope is dropped
/// instead (the validation future was cancelled or a panic unwound through
/// it), the release is handed to the current tokio runtime.
pub struct ScopedSession<S: DirectorySession + 'static> {
    session: Option<S>,
}

impl<S: DirectorySession + 'static> ScopedSession<S> {
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub async fn simple_bind(
        &mut self,
        principal: &str,
        password: &str,
    ) -> Result<BindStatus, DirectoryError> {
        match self.session.as_mut() {
            Some(session) => session.simple_bind(principal, password).await,
            None => Err(DirectoryError::Protocol("session already released".into())),
        }
    }

    /// Release the session. Release errors are logged and discarded.
    pub async fn release(mut self) {
        if let Some(mut session) = self.session.take() {
            release_quietly(&mut session).await;
        }
    }
}

impl<S: DirectorySession + 'static> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    release_quietly(&mut session).await;
                });
            }
            Err(_) => debug!("No runtime available, directory session dropped without unbind"),
        }
    }
}

async fn release_quietly<S: DirectorySession>(session: &mut S) {
    if let Err(e) = session.release().await {
        debug!("Ignoring directory session release failure: {}", e);
    }
}
