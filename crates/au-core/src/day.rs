//! Local calendar day boundaries.

use chrono::{Days, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// A closed window of epoch milliseconds covering one local calendar day,
/// from 00:00:00.000 to 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayWindow {
    /// Window for `date` interpreted in `tz`.
    pub fn for_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start_ms = local_midnight_ms(date, tz);
        let end_ms = date
            .checked_add_days(Days::new(1))
            .map_or(start_ms + 86_399_999, |next| local_midnight_ms(next, tz) - 1);
        Self { start_ms, end_ms }
    }

    /// Window for the current day in the system time zone.
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive(), &Local)
    }

    pub const fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms <= self.end_ms
    }

    pub const fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms + 1
    }
}

/// Converts local midnight of `date` to epoch milliseconds.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_ms<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        LocalResult::None => {
            // Spring-forward gap at midnight: the day starts at 01:00 local.
            let one_am = midnight + chrono::Duration::hours(1);
            resolve_or_utc(tz, one_am)
        }
    }
}

fn resolve_or_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> i64 {
    tz.from_local_datetime(&local)
        .earliest()
        .map_or_else(|| local.and_utc().timestamp_millis(), |dt| dt.timestamp_millis())
}
