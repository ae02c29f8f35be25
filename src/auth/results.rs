//! Authentication result types
//!
//! Internal classification of a bind attempt. Only the boolean derived
//! from it leaves the validator.

use crate::directory::BindStatus;
use crate::error::DirectoryError;

/// How a single bind attempt ended
#[derive(Debug)]
pub enum BindOutcome {
    Accepted,
    Rejected { code: u32 },
    Failed(DirectoryError),
}

impl BindOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, BindOutcome::Accepted)
    }
}

impl From<Result<BindStatus, DirectoryError>> for BindOutcome {
    fn from(result: Result<BindStatus, DirectoryError>) -> Self {
        match result {
            Ok(BindStatus::Accepted) => BindOutcome::Accepted,
            Ok(BindStatus::Rejected { code }) => BindOutcome::Rejected { code },
            Err(e) => BindOutcome::Failed(e),
        }
    }
}
