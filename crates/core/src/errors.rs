use thiserror::Error;

use crate::repositories::RepositoryError;

/// Outcome taxonomy for snapshot assembly. A missing customer is not an
/// error (the orchestrator returns `Ok(None)`); cancellation is distinct
/// from fetch failure so callers can tell them apart.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Fetch(#[from] RepositoryError),
    #[error("snapshot assembly canceled")]
    Canceled,
}

impl SnapshotError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
