//! File-backed adapters for the event source and app registry.

use std::fs;
use std::path::PathBuf;

use au_core::{AppRegistry, EventKind, EventSource, InstalledApp, SourceError, TransitionEvent};
use serde::Deserialize;

/// Event log stored as JSON lines, one [`TransitionEvent`] per line.
#[derive(Debug, Clone)]
pub struct JsonlEventSource {
    path: PathBuf,
}

/// Line shape before the kind is validated, so unknown kinds can be skipped.
#[derive(Debug, Deserialize)]
struct RawEvent {
    app_id: String,
    #[serde(default)]
    sub_id: String,
    kind: String,
    timestamp_ms: i64,
}

impl JsonlEventSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<TransitionEvent>, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let raw: RawEvent = serde_json::from_str(line).map_err(|e| SourceError::Parse {
                line: idx + 1,
                message: e.to_string(),
            })?;
            let kind: EventKind = match raw.kind.parse() {
                Ok(kind) => kind,
                Err(err) => {
                    tracing::debug!(line = idx + 1, %err, "skipping event");
                    continue;
                }
            };
            events.push(TransitionEvent::new(raw.app_id, raw.sub_id, kind, raw.timestamp_ms));
        }

        Ok(events)
    }
}

impl EventSource for JsonlEventSource {
    fn query_events(&self, start_ms: i64, end_ms: i64) -> Result<Vec<TransitionEvent>, SourceError> {
        let mut events: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.timestamp_ms >= start_ms && e.timestamp_ms <= end_ms)
            .collect();
        // Stable, so same-millisecond events keep their log order.
        events.sort_by_key(|e| e.timestamp_ms);
        Ok(events)
    }

    /// A non-empty log file counts as access; its lines are parsed later by
    /// the day query.
    fn stats_available(&self, _now_ms: i64) -> Result<bool, SourceError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Installed app list stored as a JSON array of [`InstalledApp`].
#[derive(Debug, Clone)]
pub struct JsonAppRegistry {
    path: PathBuf,
}

impl JsonAppRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AppRegistry for JsonAppRegistry {
    fn installed_apps(&self) -> Result<Vec<InstalledApp>, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| SourceError::Parse {
            line: e.line(),
            message: e.to_string(),
        })
    }
}
