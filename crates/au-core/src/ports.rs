//! Collaborator ports.
//!
//! The usage core never talks to the platform directly. Events come from an
//! [`EventSource`] and installed application metadata from an [`AppRegistry`];
//! adapters live with whatever binary hosts the core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::TransitionEvent;

/// Errors raised by collaborator adapters.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the backing store failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A record in the backing store could not be decoded.
    #[error("invalid record at line {line}: {message}")]
    Parse { line: usize, message: String },
    /// The collaborator cannot answer at all (e.g. access not granted).
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// True for failures that mean "nothing to read" rather than "broken data".
    pub fn is_no_access(&self) -> bool {
        match self {
            Self::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            Self::Unavailable(_) => true,
            Self::Parse { .. } => false,
        }
    }
}

/// Provides transition events for a time window.
pub trait EventSource {
    /// Returns events with `start_ms <= timestamp_ms <= end_ms`, sorted by
    /// timestamp ascending.
    fn query_events(&self, start_ms: i64, end_ms: i64) -> Result<Vec<TransitionEvent>, SourceError>;

    /// Returns true if any usage data can be read at all.
    ///
    /// Probes everything from the epoch until `now_ms`. An empty answer, a
    /// missing backing store or [`SourceError::Unavailable`] mean usage access
    /// has not been granted; any other failure is returned as is.
    fn stats_available(&self, now_ms: i64) -> Result<bool, SourceError> {
        match self.query_events(0, now_ms) {
            Ok(events) => Ok(!events.is_empty()),
            Err(err) if err.is_no_access() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Metadata about one installed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    /// User-visible label.
    pub name: String,
    pub package_name: String,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub version_code: i64,
    /// Shipped with the system image.
    #[serde(default)]
    pub is_system: bool,
    /// Has a launch entry point.
    #[serde(default = "default_true")]
    pub launchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at_ms: Option<i64>,
    /// Base64 encoded icon, only populated on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Lists applications installed on the device.
pub trait AppRegistry {
    fn installed_apps(&self) -> Result<Vec<InstalledApp>, SourceError>;
}
