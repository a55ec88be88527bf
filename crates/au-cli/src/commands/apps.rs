//! Apps commands for querying the installed application registry.

use std::io::Write;

use anyhow::{Context, Result};
use au_core::apps::{self, AppQuery};
use au_core::{InstalledApp, run_off_thread};

use crate::sources::JsonAppRegistry;
use crate::{AppsAction, Config};

pub fn run<W: Write>(writer: &mut W, config: &Config, action: &AppsAction) -> Result<()> {
    let registry = JsonAppRegistry::new(&config.apps_path);

    match action {
        AppsAction::List {
            include_system,
            include_unlaunchable,
            with_icon,
            prefix,
        } => {
            let query = AppQuery {
                exclude_system_apps: !include_system,
                launchable_only: !include_unlaunchable,
                with_icon: *with_icon,
                package_prefix: prefix.clone(),
            };
            let installed = list_in_background(registry, query)?;
            writeln!(writer, "{}", serde_json::to_string_pretty(&installed)?)?;
        }
        AppsAction::Info { package } => {
            let info = apps::app_info(&registry, package).with_context(|| {
                format!("failed to read app registry {}", config.apps_path.display())
            })?;
            writeln!(writer, "{}", serde_json::to_string_pretty(&info)?)?;
        }
        AppsAction::Installed { package } => {
            writeln!(writer, "{}", apps::is_installed(&registry, package))?;
        }
    }

    Ok(())
}

/// Reads and filters the registry on the blocking pool.
fn list_in_background(registry: JsonAppRegistry, query: AppQuery) -> Result<Vec<InstalledApp>> {
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let installed = runtime
        .block_on(run_off_thread(move || apps::list_installed(&registry, &query)))
        .context("app listing did not complete")?
        .context("failed to read app registry")?;
    Ok(installed)
}
