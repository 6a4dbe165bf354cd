//! Calendar-day arithmetic shared by the formatters and the analytics.
//!
//! Everything here works in an arbitrary `TimeZone` so callers decide whether
//! "a day" means local time, UTC, or a fixed offset (tests use the latter).

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Map a wall-clock time to an instant in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// fall inside a DST gap move forward an hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    tz.from_local_datetime(&(naive + Duration::hours(1)))
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Last millisecond of `date` in `tz` (23:59:59.999).
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    // wraps backwards past midnight
    let last_milli = NaiveTime::MIN - Duration::milliseconds(1);
    resolve_local(tz, date.and_time(last_milli))
}

pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// Canonical `YYYY-MM-DD` grouping key.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
