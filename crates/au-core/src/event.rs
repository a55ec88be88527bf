//! Transition events as delivered by the platform usage log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of transition the platform reports for an app screen.
///
/// Only [`EventKind::Resumed`] and [`EventKind::Stopped`] feed the usage
/// aggregation; everything else is carried through and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resumed,
    Paused,
    Stopped,
    ConfigurationChange,
    ScreenInteractive,
    ScreenNonInteractive,
    KeyguardShown,
    KeyguardHidden,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resumed => "activity_resumed",
            Self::Paused => "activity_paused",
            Self::Stopped => "activity_stopped",
            Self::ConfigurationChange => "configuration_change",
            Self::ScreenInteractive => "screen_interactive",
            Self::ScreenNonInteractive => "screen_non_interactive",
            Self::KeyguardShown => "keyguard_shown",
            Self::KeyguardHidden => "keyguard_hidden",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Numeric aliases are the raw platform event codes.
        match s {
            "activity_resumed" | "1" => Ok(Self::Resumed),
            "activity_paused" | "2" => Ok(Self::Paused),
            "activity_stopped" | "23" => Ok(Self::Stopped),
            "configuration_change" | "5" => Ok(Self::ConfigurationChange),
            "screen_interactive" | "15" => Ok(Self::ScreenInteractive),
            "screen_non_interactive" | "16" => Ok(Self::ScreenNonInteractive),
            "keyguard_shown" | "17" => Ok(Self::KeyguardShown),
            "keyguard_hidden" | "18" => Ok(Self::KeyguardHidden),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown event kind strings.
#[derive(Debug, Clone)]
pub struct UnknownEventKind(String);

impl UnknownEventKind {
    /// The string that failed to parse.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

/// A single screen transition for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Application identifier (package name).
    pub app_id: String,
    /// Screen or activity within the application.
    pub sub_id: String,
    /// What happened.
    pub kind: EventKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl TransitionEvent {
    pub fn new(
        app_id: impl Into<String>,
        sub_id: impl Into<String>,
        kind: EventKind,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            sub_id: sub_id.into(),
            kind,
            timestamp_ms,
        }
    }

    pub fn resumed(app_id: impl Into<String>, sub_id: impl Into<String>, timestamp_ms: i64) -> Self {
        Self::new(app_id, sub_id, EventKind::Resumed, timestamp_ms)
    }

    pub fn stopped(app_id: impl Into<String>, sub_id: impl Into<String>, timestamp_ms: i64) -> Self {
        Self::new(app_id, sub_id, EventKind::Stopped, timestamp_ms)
    }
}
