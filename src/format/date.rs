//! Display strings for session instants.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::InstantValue;

use super::instant::parse_instant;

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";

const MEDIUM_PATTERN: &str = "%b %d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateFormat {
    /// `03/05/2024`
    Short,
    /// `Mar 05, 2024`
    Medium,
    /// `March 05, 2024`
    Long,
    /// `14:07`
    Time,
    /// `02:07 PM`
    Time12,
    /// `Mar 05, 2024 14:07`
    Datetime,
    /// `Mar 05, 2024 02:07 PM`
    Datetime12,
    /// `Tuesday, March 05, 2024 14:07:09`
    Full,
    /// `5 minutes ago`
    Relative,
    /// `2024-03-05T14:07:09.123Z`
    Iso,
    /// `2024-03-05`, for date inputs
    Input,
    /// `14:07`, for time inputs
    InputTime,
    #[default]
    Default,
}

impl DateFormat {
    /// Unrecognised tokens resolve to `Default`.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "short" => DateFormat::Short,
            "medium" => DateFormat::Medium,
            "long" => DateFormat::Long,
            "time" => DateFormat::Time,
            "time12" => DateFormat::Time12,
            "datetime" => DateFormat::Datetime,
            "datetime12" => DateFormat::Datetime12,
            "full" => DateFormat::Full,
            "relative" => DateFormat::Relative,
            "iso" => DateFormat::Iso,
            "input" => DateFormat::Input,
            "input-time" => DateFormat::InputTime,
            _ => DateFormat::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Short => "short",
            DateFormat::Medium => "medium",
            DateFormat::Long => "long",
            DateFormat::Time => "time",
            DateFormat::Time12 => "time12",
            DateFormat::Datetime => "datetime",
            DateFormat::Datetime12 => "datetime12",
            DateFormat::Full => "full",
            DateFormat::Relative => "relative",
            DateFormat::Iso => "iso",
            DateFormat::Input => "input",
            DateFormat::InputTime => "input-time",
            DateFormat::Default => "default",
        }
    }

    /// strftime pattern; `None` for the computed formats.
    fn pattern(&self) -> Option<&'static str> {
        match self {
            DateFormat::Short => Some("%m/%d/%Y"),
            DateFormat::Medium => Some(MEDIUM_PATTERN),
            DateFormat::Long => Some("%B %d, %Y"),
            DateFormat::Time | DateFormat::InputTime => Some("%H:%M"),
            DateFormat::Time12 => Some("%I:%M %p"),
            DateFormat::Datetime | DateFormat::Default => Some("%b %d, %Y %H:%M"),
            DateFormat::Datetime12 => Some("%b %d, %Y %I:%M %p"),
            DateFormat::Full => Some("%A, %B %d, %Y %H:%M:%S"),
            DateFormat::Input => Some("%Y-%m-%d"),
            DateFormat::Relative | DateFormat::Iso => None,
        }
    }
}

impl From<String> for DateFormat {
    fn from(token: String) -> Self {
        DateFormat::parse(&token)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Render a raw instant. Absent → `"N/A"`, unparseable → `"Invalid Date"`.
///
/// `now` supplies the display timezone and, for `Relative`, the reference
/// point.
pub fn format_date<Tz>(instant: Option<&InstantValue>, format: DateFormat, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(value) = instant else {
        return NOT_AVAILABLE.to_string();
    };

    match parse_instant(value, &now.timezone()) {
        Ok(dt) => format_datetime(&dt, format, now),
        Err(_) => INVALID_DATE.to_string(),
    }
}

pub fn format_datetime<Tz>(dt: &DateTime<Tz>, format: DateFormat, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        DateFormat::Relative => format_relative_time(dt, now),
        DateFormat::Iso => dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        other => match other.pattern() {
            Some(pattern) => dt.format(pattern).to_string(),
            None => dt.format(MEDIUM_PATTERN).to_string(),
        },
    }
}

/// "just now" / "n minutes ago" / "n hours ago" / "n days ago", then the
/// medium date once a week has passed. Units are floored.
pub fn format_relative_time<Tz>(instant: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now.clone().signed_duration_since(instant.clone());

    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return ago(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return ago(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return ago(days, "day");
    }

    instant.format(MEDIUM_PATTERN).to_string()
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap()
            + Duration::milliseconds(123)
    }

    fn at(dt: DateTime<FixedOffset>) -> InstantValue {
        InstantValue::from(dt)
    }

    #[test]
    fn test_absent_and_invalid() {
        assert_eq!(format_date(None, DateFormat::Medium, &now()), "N/A");
        assert_eq!(format_date(None, DateFormat::Relative, &now()), "N/A");
        let bad = InstantValue::from("not-a-date");
        assert_eq!(format_date(Some(&bad), DateFormat::Medium, &now()), "Invalid Date");
    }

    #[test]
    fn test_fixed_patterns() {
        let value = at(now());
        let cases = [
            (DateFormat::Short, "03/05/2024"),
            (DateFormat::Medium, "Mar 05, 2024"),
            (DateFormat::Long, "March 05, 2024"),
            (DateFormat::Time, "14:07"),
            (DateFormat::Time12, "02:07 PM"),
            (DateFormat::Datetime, "Mar 05, 2024 14:07"),
            (DateFormat::Datetime12, "Mar 05, 2024 02:07 PM"),
            (DateFormat::Full, "Tuesday, March 05, 2024 14:07:09"),
            (DateFormat::Iso, "2024-03-05T14:07:09.123Z"),
            (DateFormat::Input, "2024-03-05"),
            (DateFormat::InputTime, "14:07"),
            (DateFormat::Default, "Mar 05, 2024 14:07"),
        ];
        for (format, expected) in cases {
            assert_eq!(format_date(Some(&value), format, &now()), expected, "{format:?}");
        }
    }

    #[test]
    fn test_patterns_render_in_zone_of_now() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let local_now = now().with_timezone(&tz);
        let value = at(now());
        assert_eq!(format_date(Some(&value), DateFormat::Time, &local_now), "23:07");
        // ISO is always UTC
        assert_eq!(
            format_date(Some(&value), DateFormat::Iso, &local_now),
            "2024-03-05T14:07:09.123Z"
        );
    }

    #[test]
    fn test_unknown_token_falls_back_to_default() {
        assert_eq!(DateFormat::parse("fancy"), DateFormat::Default);
        assert_eq!(DateFormat::parse("input-time"), DateFormat::InputTime);
        let format: DateFormat = serde_json::from_str("\"weird\"").unwrap();
        assert_eq!(format, DateFormat::Default);
    }

    #[test]
    fn test_relative_thresholds() {
        let n = now();
        let cases = [
            (Duration::seconds(0), "just now"),
            (Duration::seconds(59), "just now"),
            (Duration::seconds(60), "1 minute ago"),
            (Duration::seconds(119), "1 minute ago"),
            (Duration::minutes(59) + Duration::seconds(59), "59 minutes ago"),
            (Duration::minutes(60), "1 hour ago"),
            (Duration::hours(5) + Duration::minutes(59), "5 hours ago"),
            (Duration::hours(24), "1 day ago"),
            (Duration::days(6) + Duration::hours(23), "6 days ago"),
            (Duration::days(7), "Feb 27, 2024"),
        ];
        for (offset, expected) in cases {
            assert_eq!(format_relative_time(&(n - offset), &n), expected, "{offset:?}");
        }
    }

    #[test]
    fn test_relative_future_is_just_now() {
        let n = now();
        assert_eq!(format_relative_time(&(n + Duration::hours(3)), &n), "just now");
    }

    #[test]
    fn test_relative_through_format_date() {
        let n = now();
        let value = at(n - Duration::minutes(5));
        assert_eq!(format_date(Some(&value), DateFormat::Relative, &n), "5 minutes ago");
    }

    #[test]
    fn test_iso_round_trip() {
        let value = at(now());
        let iso = format_date(Some(&value), DateFormat::Iso, &now());
        let parsed = DateTime::parse_from_rfc3339(&iso).unwrap();
        assert_eq!(parsed.timestamp_millis(), now().timestamp_millis());
    }
}
