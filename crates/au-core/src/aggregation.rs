//! Foreground usage aggregation.
//!
//! Folds one day's worth of screen transition events into the total time each
//! application spent in the foreground.
//!
//! # Algorithm Summary
//!
//! 1. A resumed event opens (or re-opens) an interval for its `(app, screen)` pair
//! 2. A stopped event closes the interval of the same pair, adding
//!    `stop - last_resume` to the app total
//! 3. Apps matching the exclusion pattern are dropped, the rest are sorted by
//!    total time descending

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::event::{EventKind, TransitionEvent};

/// Exclusion pattern applied when none is configured.
pub const DEFAULT_EXCLUDE_PATTERN: &str = "launcher";

/// Configuration for usage aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Case-insensitive substring; any app id containing it is left out of
    /// the result. An empty pattern matches every app, so it is treated as
    /// "exclude nothing".
    /// Default: `"launcher"` (the home screen app).
    pub exclude_pattern: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
        }
    }
}

impl AggregationConfig {
    pub fn with_exclude_pattern(pattern: impl Into<String>) -> Self {
        Self {
            exclude_pattern: pattern.into(),
        }
    }

    /// Returns true if `app_id` should be left out of the report.
    pub fn excludes(&self, app_id: &str) -> bool {
        if self.exclude_pattern.is_empty() {
            return false;
        }
        app_id
            .to_lowercase()
            .contains(&self.exclude_pattern.to_lowercase())
    }
}

/// Foreground time computed for a single application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsage {
    pub app_id: String,
    pub foreground_ms: i64,
}

impl AppUsage {
    /// Whole seconds, truncated.
    pub const fn foreground_secs(&self) -> i64 {
        self.foreground_ms / 1000
    }

    /// Whole minutes, truncated.
    pub const fn foreground_minutes(&self) -> i64 {
        self.foreground_ms / 60_000
    }
}

/// Result of one aggregation run, ordered by foreground time descending.
///
/// Serializes as a JSON object mapping app id to whole seconds, keeping the
/// descending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageReport {
    pub apps: Vec<AppUsage>,
}

impl UsageReport {
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Sum over all included apps, in milliseconds.
    pub fn total_foreground_ms(&self) -> i64 {
        self.apps
            .iter()
            .fold(0_i64, |total, app| total.saturating_add(app.foreground_ms))
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_foreground_ms() / 60_000
    }

    /// `(app_id, seconds)` pairs in report order.
    pub fn to_seconds(&self) -> Vec<(String, i64)> {
        self.apps
            .iter()
            .map(|app| (app.app_id.clone(), app.foreground_secs()))
            .collect()
    }
}

impl Serialize for UsageReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.apps.len()))?;
        for app in &self.apps {
            map.serialize_entry(&app.app_id, &app.foreground_secs())?;
        }
        map.end()
    }
}

/// Open/closed state of one screen.
#[derive(Debug, Clone)]
struct SubState {
    last_resume_ms: i64,
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "toggled on every transition, never read by the totals")
    )]
    resumed: bool,
}

/// Per-application state for a single run.
#[derive(Debug, Clone)]
struct AppState {
    app_id: String,
    /// Last resumed screen. Maintained but not consulted by the totals.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "per-app current screen has no reader yet")
    )]
    current_sub_id: String,
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "per-app current screen has no reader yet")
    )]
    current_resume_ms: i64,
    foreground_ms: i64,
    screens: HashMap<String, SubState>,
}

impl AppState {
    fn new(app_id: &str, sub_id: &str, timestamp_ms: i64) -> Self {
        let mut screens = HashMap::new();
        screens.insert(
            sub_id.to_string(),
            SubState {
                last_resume_ms: timestamp_ms,
                resumed: true,
            },
        );
        Self {
            app_id: app_id.to_string(),
            current_sub_id: sub_id.to_string(),
            current_resume_ms: timestamp_ms,
            foreground_ms: 0,
            screens,
        }
    }

    fn resume(&mut self, sub_id: &str, timestamp_ms: i64) {
        self.current_sub_id = sub_id.to_string();
        self.current_resume_ms = timestamp_ms;
        let screen = self
            .screens
            .entry(sub_id.to_string())
            .or_insert(SubState {
                last_resume_ms: timestamp_ms,
                resumed: true,
            });
        screen.last_resume_ms = timestamp_ms;
        screen.resumed = true;
    }

    /// Closes the interval for `sub_id`. Unknown screens are ignored.
    fn stop(&mut self, sub_id: &str, timestamp_ms: i64) {
        if let Some(screen) = self.screens.get_mut(sub_id) {
            let delta = timestamp_ms.saturating_sub(screen.last_resume_ms).max(0);
            self.foreground_ms = self.foreground_ms.saturating_add(delta);
            screen.resumed = false;
        }
    }
}

/// Tracking state for one aggregation run.
///
/// Apps are kept in first-encounter order so that ties in the final sort
/// are deterministic.
#[derive(Debug, Default)]
struct UsageTracker {
    index: HashMap<String, usize>,
    apps: Vec<AppState>,
}

impl UsageTracker {
    fn apply(&mut self, event: &TransitionEvent) {
        match event.kind {
            EventKind::Resumed => {
                if let Some(&i) = self.index.get(&event.app_id) {
                    self.apps[i].resume(&event.sub_id, event.timestamp_ms);
                } else {
                    self.index.insert(event.app_id.clone(), self.apps.len());
                    self.apps.push(AppState::new(
                        &event.app_id,
                        &event.sub_id,
                        event.timestamp_ms,
                    ));
                }
            }
            EventKind::Stopped => {
                if let Some(&i) = self.index.get(&event.app_id) {
                    self.apps[i].stop(&event.sub_id, event.timestamp_ms);
                }
            }
            _ => {}
        }
    }

    fn finish(self, config: &AggregationConfig) -> UsageReport {
        let mut apps: Vec<AppUsage> = self
            .apps
            .into_iter()
            .filter(|state| !config.excludes(&state.app_id))
            .map(|state| AppUsage {
                app_id: state.app_id,
                foreground_ms: state.foreground_ms,
            })
            .collect();
        apps.sort_by_key(|app| std::cmp::Reverse(app.foreground_ms));
        UsageReport { apps }
    }
}

/// Aggregate per-app foreground time from a chronological event stream.
///
/// Events must be sorted by timestamp ascending. A stopped event with no
/// earlier resumed event for the same app and screen changes nothing. Event
/// kinds other than resumed/stopped are ignored. Never fails: an empty
/// stream produces an empty report.
pub fn aggregate<'a, I>(events: I, config: &AggregationConfig) -> UsageReport
where
    I: IntoIterator<Item = &'a TransitionEvent>,
{
    let mut tracker = UsageTracker::default();
    for event in events {
        tracker.apply(event);
    }

    let report = tracker.finish(config);

    for app in &report.apps {
        tracing::debug!(
            app_id = %app.app_id,
            minutes = app.foreground_minutes(),
            "foreground time"
        );
    }
    tracing::info!(
        apps = report.apps.len(),
        total_minutes = report.total_minutes(),
        "total screen time"
    );

    report
}
