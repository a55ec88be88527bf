//! Core domain logic for daily app usage.
//!
//! This crate contains the fundamental types and logic for:
//! - Aggregation: folding screen transition events into per-app foreground time
//! - Day windows: local calendar day boundaries in epoch milliseconds
//! - Ports: the event source and app registry collaborators
//! - App queries: filtering the installed application list

mod aggregation;
pub mod apps;
pub mod background;
pub mod day;
mod error;
pub mod event;
pub mod ports;
mod service;

pub use aggregation::{
    AggregationConfig, AppUsage, DEFAULT_EXCLUDE_PATTERN, UsageReport, aggregate,
};
pub use apps::AppQuery;
pub use background::run_off_thread;
pub use day::DayWindow;
pub use error::UsageError;
pub use event::{EventKind, TransitionEvent, UnknownEventKind};
pub use ports::{AppRegistry, EventSource, InstalledApp, SourceError};
pub use service::UsageService;
