//! Installed application queries over an [`AppRegistry`].

use crate::ports::{AppRegistry, InstalledApp, SourceError};

/// Filters for listing installed applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppQuery {
    /// Drop apps shipped with the system image.
    /// Default: true.
    pub exclude_system_apps: bool,
    /// Keep only apps with a launch entry point.
    /// Default: true.
    pub launchable_only: bool,
    /// Include icon data in the result.
    /// Default: false.
    pub with_icon: bool,
    /// Keep only packages starting with this prefix (compared lower-cased).
    /// Empty means no prefix filter.
    pub package_prefix: String,
}

impl Default for AppQuery {
    fn default() -> Self {
        Self {
            exclude_system_apps: true,
            launchable_only: true,
            with_icon: false,
            package_prefix: String::new(),
        }
    }
}

impl AppQuery {
    fn matches(&self, app: &InstalledApp) -> bool {
        if self.exclude_system_apps && app.is_system {
            return false;
        }
        if self.launchable_only && !app.launchable {
            return false;
        }
        self.package_prefix.is_empty()
            || app
                .package_name
                .starts_with(&self.package_prefix.to_lowercase())
    }
}

/// Lists installed apps matching `query`.
pub fn list_installed<R: AppRegistry + ?Sized>(
    registry: &R,
    query: &AppQuery,
) -> Result<Vec<InstalledApp>, SourceError> {
    let apps = registry
        .installed_apps()?
        .into_iter()
        .filter(|app| query.matches(app))
        .map(|mut app| {
            if !query.with_icon {
                app.icon = None;
            }
            app
        })
        .collect::<Vec<_>>();
    tracing::debug!(count = apps.len(), ?query, "listed installed apps");
    Ok(apps)
}

/// Looks up a single app by exact package name, icon included.
pub fn app_info<R: AppRegistry + ?Sized>(
    registry: &R,
    package_name: &str,
) -> Result<Option<InstalledApp>, SourceError> {
    Ok(registry
        .installed_apps()?
        .into_iter()
        .find(|app| app.package_name == package_name))
}

/// Returns true if `package_name` is installed. Lookup failures count as
/// not installed.
pub fn is_installed<R: AppRegistry + ?Sized>(registry: &R, package_name: &str) -> bool {
    match app_info(registry, package_name) {
        Ok(found) => found.is_some(),
        Err(err) => {
            tracing::warn!(%err, package_name, "app lookup failed");
            false
        }
    }
}

/// Returns true if `package_name` is installed as a system app. Unknown
/// packages and lookup failures are reported as non-system.
pub fn is_system_app<R: AppRegistry + ?Sized>(registry: &R, package_name: &str) -> bool {
    app_info(registry, package_name)
        .ok()
        .flatten()
        .is_some_and(|app| app.is_system)
}
