//! Daily usage queries: permission probe, day window, aggregation.

use chrono::{Local, NaiveDate, TimeZone};

use crate::aggregation::{AggregationConfig, UsageReport, aggregate};
use crate::day::DayWindow;
use crate::error::UsageError;
use crate::ports::EventSource;

/// Answers "how long was each app in the foreground" for a day.
pub struct UsageService<S> {
    source: S,
    config: AggregationConfig,
}

impl<S: EventSource> UsageService<S> {
    pub const fn new(source: S, config: AggregationConfig) -> Self {
        Self { source, config }
    }

    /// Aggregates whatever the source returns for `window`.
    ///
    /// Does not probe for usage access; callers that have not checked
    /// [`EventSource::stats_available`] should use [`Self::usage_for_date`].
    pub fn usage_for_window(&self, window: DayWindow) -> Result<UsageReport, UsageError> {
        let events = self.source.query_events(window.start_ms, window.end_ms)?;
        tracing::debug!(
            events = events.len(),
            start_ms = window.start_ms,
            end_ms = window.end_ms,
            "queried usage events"
        );
        Ok(aggregate(&events, &self.config))
    }

    /// Usage for the local calendar day `date` in `tz`.
    ///
    /// Fails with [`UsageError::PermissionUnavailable`] before touching the
    /// aggregator if the source has no readable data up to `now_ms`. Broken
    /// data surfaces as [`UsageError::Source`].
    pub fn usage_for_date_in<Tz: TimeZone>(
        &self,
        date: NaiveDate,
        tz: &Tz,
        now_ms: i64,
    ) -> Result<UsageReport, UsageError> {
        if !self.source.stats_available(now_ms)? {
            tracing::warn!("usage access not granted");
            return Err(UsageError::PermissionUnavailable);
        }
        self.usage_for_window(DayWindow::for_date(date, tz))
    }

    /// Usage for the local calendar day `date` in the system time zone.
    pub fn usage_for_date(&self, date: NaiveDate) -> Result<UsageReport, UsageError> {
        self.usage_for_date_in(date, &Local, Local::now().timestamp_millis())
    }

    /// Usage for today in the system time zone.
    pub fn todays_usage(&self) -> Result<UsageReport, UsageError> {
        self.usage_for_date(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::Utc;

    use crate::event::TransitionEvent;
    use crate::ports::SourceError;

    struct RecordingSource {
        events: Vec<TransitionEvent>,
        queries: Cell<usize>,
    }

    impl RecordingSource {
        fn new(events: Vec<TransitionEvent>) -> Self {
            Self {
                events,
                queries: Cell::new(0),
            }
        }
    }

    impl EventSource for RecordingSource {
        fn query_events(
            &self,
            start_ms: i64,
            end_ms: i64,
        ) -> Result<Vec<TransitionEvent>, SourceError> {
            self.queries.set(self.queries.get() + 1);
            Ok(self
                .events
                .iter()
                .filter(|e| e.timestamp_ms >= start_ms && e.timestamp_ms <= end_ms)
                .cloned()
                .collect())
        }
    }

    fn ms(h: u32, m: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0)
            .single()
            .expect("valid test timestamp")
            .timestamp_millis()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn only_events_inside_the_day_count() {
        let source = RecordingSource::new(vec![
            // Yesterday's interval never closes inside today's window.
            TransitionEvent::resumed("com.example.mail", "Inbox", ms(0, 0) - 60_000),
            TransitionEvent::stopped("com.example.mail", "Inbox", ms(0, 5)),
            TransitionEvent::resumed("com.example.chat", "Main", ms(9, 0)),
            TransitionEvent::stopped("com.example.chat", "Main", ms(9, 30)),
        ]);
        let service = UsageService::new(source, AggregationConfig::default());

        let report = service.usage_for_date_in(day(), &Utc, ms(23, 0)).unwrap();

        assert_eq!(report.to_seconds(), vec![("com.example.chat".to_string(), 1800)]);
    }

    #[test]
    fn missing_access_short_circuits() {
        let service = UsageService::new(RecordingSource::new(Vec::new()), AggregationConfig::default());

        let err = service.usage_for_date_in(day(), &Utc, ms(12, 0)).unwrap_err();

        assert!(matches!(err, UsageError::PermissionUnavailable));
        // Only the probe ran.
        assert_eq!(service.source.queries.get(), 1);
    }

    struct CorruptSource;

    impl EventSource for CorruptSource {
        fn query_events(&self, _: i64, _: i64) -> Result<Vec<TransitionEvent>, SourceError> {
            Err(SourceError::Parse {
                line: 7,
                message: "EOF while parsing an object".to_string(),
            })
        }
    }

    #[test]
    fn corrupt_source_is_a_source_error() {
        let service = UsageService::new(CorruptSource, AggregationConfig::default());

        let err = service.usage_for_date_in(day(), &Utc, ms(12, 0)).unwrap_err();

        assert!(matches!(err, UsageError::Source(SourceError::Parse { line: 7, .. })));
    }

    #[test]
    fn empty_day_with_access_is_empty_report() {
        let source = RecordingSource::new(vec![
            TransitionEvent::resumed("com.example.mail", "Inbox", ms(9, 0) - 86_400_000),
            TransitionEvent::stopped("com.example.mail", "Inbox", ms(9, 10) - 86_400_000),
        ]);
        let service = UsageService::new(source, AggregationConfig::default());

        let report = service.usage_for_date_in(day(), &Utc, ms(12, 0)).unwrap();

        assert!(report.is_empty());
    }

    #[test]
    fn configured_pattern_is_applied() {
        let source = RecordingSource::new(vec![
            TransitionEvent::resumed("com.example.mail", "Inbox", ms(9, 0)),
            TransitionEvent::stopped("com.example.mail", "Inbox", ms(9, 1)),
            TransitionEvent::resumed("com.example.chat", "Main", ms(9, 1)),
            TransitionEvent::stopped("com.example.chat", "Main", ms(9, 2)),
        ]);
        let service = UsageService::new(source, AggregationConfig::with_exclude_pattern("MAIL"));

        let report = service.usage_for_date_in(day(), &Utc, ms(12, 0)).unwrap();

        assert_eq!(report.to_seconds(), vec![("com.example.chat".to_string(), 60)]);
    }
}
