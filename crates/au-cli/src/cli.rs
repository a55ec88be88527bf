//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Daily app usage.
///
/// Reconstructs how long each application spent in the foreground today
/// from the platform's screen transition log.
#[derive(Debug, Parser)]
#[command(name = "au", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show per-app foreground time for a day.
    Usage(UsageArgs),

    /// Query installed applications.
    #[command(subcommand)]
    Apps(AppsAction),
}

#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Local calendar day to report (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output a JSON object of app id to seconds.
    #[arg(long)]
    pub json: bool,

    /// Override the configured exclusion pattern ("" disables it).
    #[arg(long)]
    pub exclude: Option<String>,
}

/// Installed application queries.
#[derive(Debug, Subcommand)]
pub enum AppsAction {
    /// List installed applications as JSON.
    List {
        /// Include apps shipped with the system image.
        #[arg(long)]
        include_system: bool,

        /// Include apps without a launch entry point.
        #[arg(long)]
        include_unlaunchable: bool,

        /// Include icon data.
        #[arg(long)]
        with_icon: bool,

        /// Only packages starting with this prefix.
        #[arg(long, default_value = "")]
        prefix: String,
    },

    /// Show one installed application as JSON (`null` if missing).
    Info {
        /// Package name, e.g. com.example.mail.
        package: String,
    },

    /// Print whether a package is installed.
    Installed {
        /// Package name, e.g. com.example.mail.
        package: String,
    },
}
