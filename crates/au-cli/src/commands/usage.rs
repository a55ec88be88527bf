//! Usage command: per-app foreground time for one local day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result, bail};
use au_core::{AggregationConfig, UsageError, UsageReport, UsageService};
use chrono::{Local, NaiveDate};

use crate::sources::JsonlEventSource;
use crate::{Config, UsageArgs};

/// Runs the usage command, writing either a table or a JSON object.
pub fn run<W: Write>(writer: &mut W, config: &Config, args: &UsageArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let pattern = args
        .exclude
        .clone()
        .unwrap_or_else(|| config.exclude_pattern.clone());

    let report = generate_report(config, date, pattern)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(date, &report))?;
    }
    Ok(())
}

/// Reads the configured event log and aggregates `date`.
pub fn generate_report(config: &Config, date: NaiveDate, exclude_pattern: String) -> Result<UsageReport> {
    let source = JsonlEventSource::new(&config.events_path);
    let service = UsageService::new(source, AggregationConfig::with_exclude_pattern(exclude_pattern));

    match service.usage_for_date(date) {
        Ok(report) => Ok(report),
        Err(UsageError::PermissionUnavailable) => bail!(
            "usage access not granted: no events readable from {}\n\
             Hint: grant usage access so events get recorded, or set AU_EVENTS_PATH",
            config.events_path.display()
        ),
        Err(err) => Err(err).with_context(|| {
            format!(
                "failed to read usage events from {}",
                config.events_path.display()
            )
        }),
    }
}

/// Formats milliseconds as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
pub fn format_duration(ms: i64) -> String {
    let total_minutes = ms.max(0) / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats the human-readable usage table.
pub fn format_report(date: NaiveDate, report: &UsageReport) -> String {
    let mut output = String::new();

    writeln!(output, "APP USAGE: {}", date.format("%A, %b %-d, %Y")).unwrap();

    if report.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No foreground activity recorded.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    for app in &report.apps {
        let duration = format_duration(app.foreground_ms);
        writeln!(
            output,
            "  {:<30} {duration:>7}  ({}s)",
            app.app_id,
            app.foreground_secs()
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {} across {} apps",
        format_duration(report.total_foreground_ms()),
        report.apps.len()
    )
    .unwrap();

    output
}
