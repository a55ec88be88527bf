//! Configuration loading and management.

use std::path::{Path, PathBuf};

use au_core::DEFAULT_EXCLUDE_PATTERN;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSONL file of transition events (one event per line).
    pub events_path: PathBuf,
    /// JSON file listing installed applications.
    pub apps_path: PathBuf,
    /// Apps whose id contains this (case-insensitive) are left out of reports.
    pub exclude_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.jsonl"),
            apps_path: data_dir.join("apps.json"),
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (AU_*) win over files.
        figment = figment.merge(Env::prefixed("AU_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for au.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("au"))
}

/// Returns the platform-specific data directory for au.
///
/// On Linux: `~/.local/share/au`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("au"))
}
