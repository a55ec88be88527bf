//! Errors surfaced by the usage service.

use thiserror::Error;

use crate::ports::SourceError;

/// Errors from usage queries.
///
/// The aggregation itself is total; everything here comes from the
/// collaborators around it.
#[derive(Debug, Error)]
pub enum UsageError {
    /// Usage access has not been granted, so no events can be read.
    #[error("usage access not granted")]
    PermissionUnavailable,
    /// The event source or app registry failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Background work panicked or was cancelled before reporting.
    #[error("background task failed: {0}")]
    Background(String),
}
