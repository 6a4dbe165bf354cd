use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{days_before, end_of_day, start_of_day};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// Named calendar window, resolved against "now" on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Period {
    #[default]
    Today,
    Yesterday,
    Week,
    LastWeek,
    Month,
    LastMonth,
    Year,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::Today,
        Period::Yesterday,
        Period::Week,
        Period::LastWeek,
        Period::Month,
        Period::LastMonth,
        Period::Year,
    ];

    /// Unrecognised tokens resolve to `Today`.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "yesterday" => Period::Yesterday,
            "week" => Period::Week,
            "lastWeek" => Period::LastWeek,
            "month" => Period::Month,
            "lastMonth" => Period::LastMonth,
            "year" => Period::Year,
            _ => Period::Today,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::Week => "week",
            Period::LastWeek => "lastWeek",
            Period::Month => "month",
            Period::LastMonth => "lastMonth",
            Period::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Yesterday => "Yesterday",
            Period::Week => "This Week",
            Period::LastWeek => "Last Week",
            Period::Month => "This Month",
            Period::LastMonth => "Last Month",
            Period::Year => "This Year",
        }
    }
}

impl From<String> for Period {
    fn from(token: String) -> Self {
        Period::parse(&token)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeekMode {
    /// Weeks begin on the configured weekday.
    #[default]
    Calendar,
    /// The week is the last seven days ending today.
    Rolling,
}

impl WeekMode {
    /// Unrecognised tokens resolve to `Calendar`.
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("rolling") {
            WeekMode::Rolling
        } else {
            WeekMode::Calendar
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekMode::Calendar => "calendar",
            WeekMode::Rolling => "rolling",
        }
    }
}

impl From<String> for WeekMode {
    fn from(token: String) -> Self {
        WeekMode::parse(&token)
    }
}

impl From<WeekMode> for String {
    fn from(mode: WeekMode) -> Self {
        mode.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekOptions {
    pub week_start: Weekday,
    pub mode: WeekMode,
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            mode: WeekMode::Calendar,
        }
    }
}

/// Inclusive `[start, end]` window for a [`Period`].
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRange<Tz: TimeZone> {
    pub period: Period,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub label: &'static str,
}

impl<Tz: TimeZone> PeriodRange<Tz> {
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        instant >= &self.start && instant <= &self.end
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// Number of calendar days covered.
    pub fn day_count(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }
}

pub fn get_period_range<Tz: TimeZone>(
    period: Period,
    now: &DateTime<Tz>,
    options: &WeekOptions,
) -> PeriodRange<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let (first, last) = match period {
        Period::Today => (today, today),
        Period::Yesterday => {
            let yesterday = days_before(today, 1);
            (yesterday, yesterday)
        }
        Period::Week => (week_start_date(today, options), today),
        Period::LastWeek => {
            let this_week = week_start_date(today, options);
            (days_before(this_week, 7), days_before(this_week, 1))
        }
        Period::Month => (first_of_month(today), today),
        Period::LastMonth => {
            let last_of_previous = days_before(first_of_month(today), 1);
            (first_of_month(last_of_previous), last_of_previous)
        }
        Period::Year => (today.with_ordinal(1).unwrap_or(today), today),
    };

    log_debug!("period {} resolved to {first}..={last}", period.as_str());

    PeriodRange {
        period,
        start: start_of_day(first, &tz),
        end: end_of_day(last, &tz),
        label: period.label(),
    }
}

fn week_start_date(today: NaiveDate, options: &WeekOptions) -> NaiveDate {
    match options.mode {
        WeekMode::Rolling => days_before(today, 6),
        WeekMode::Calendar => {
            let today_index = today.weekday().num_days_from_monday();
            let start_index = options.week_start.num_days_from_monday();
            let offset = (today_index + 7 - start_index) % 7;
            days_before(today, u64::from(offset))
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Timelike};

    // Wednesday
    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 13, 15, 30, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_of(range: &PeriodRange<FixedOffset>) -> (NaiveDate, NaiveDate) {
        (range.start.date_naive(), range.end.date_naive())
    }

    #[test]
    fn test_today_spans_whole_day() {
        let range = get_period_range(Period::Today, &now(), &WeekOptions::default());
        assert_eq!(days_of(&range), (date(2024, 3, 13), date(2024, 3, 13)));
        assert_eq!((range.start.hour(), range.start.minute()), (0, 0));
        assert_eq!((range.end.hour(), range.end.minute(), range.end.second()), (23, 59, 59));
        assert_eq!(range.label, "Today");
        assert!(range.contains(&now()));
        assert!(!range.contains(&(range.end.clone() + Duration::milliseconds(1))));
        assert_eq!(range.day_count(), 1);
    }

    #[test]
    fn test_yesterday() {
        let range = get_period_range(Period::Yesterday, &now(), &WeekOptions::default());
        assert_eq!(days_of(&range), (date(2024, 3, 12), date(2024, 3, 12)));
        assert!(!range.contains(&now()));
    }

    #[test]
    fn test_calendar_week_aligns_to_week_start() {
        let monday = WeekOptions::default();
        let range = get_period_range(Period::Week, &now(), &monday);
        assert_eq!(days_of(&range), (date(2024, 3, 11), date(2024, 3, 13)));

        let last = get_period_range(Period::LastWeek, &now(), &monday);
        assert_eq!(days_of(&last), (date(2024, 3, 4), date(2024, 3, 10)));
        assert_eq!(last.day_count(), 7);

        let sunday = WeekOptions {
            week_start: Weekday::Sun,
            mode: WeekMode::Calendar,
        };
        let range = get_period_range(Period::Week, &now(), &sunday);
        assert_eq!(days_of(&range), (date(2024, 3, 10), date(2024, 3, 13)));

        let wednesday = WeekOptions {
            week_start: Weekday::Wed,
            mode: WeekMode::Calendar,
        };
        let range = get_period_range(Period::Week, &now(), &wednesday);
        assert_eq!(days_of(&range), (date(2024, 3, 13), date(2024, 3, 13)));
    }

    #[test]
    fn test_rolling_week() {
        let rolling = WeekOptions {
            week_start: Weekday::Mon,
            mode: WeekMode::Rolling,
        };
        let range = get_period_range(Period::Week, &now(), &rolling);
        assert_eq!(days_of(&range), (date(2024, 3, 7), date(2024, 3, 13)));
        assert_eq!(range.day_count(), 7);

        let last = get_period_range(Period::LastWeek, &now(), &rolling);
        assert_eq!(days_of(&last), (date(2024, 2, 29), date(2024, 3, 6)));
    }

    #[test]
    fn test_month_ranges() {
        let options = WeekOptions::default();
        let month = get_period_range(Period::Month, &now(), &options);
        assert_eq!(days_of(&month), (date(2024, 3, 1), date(2024, 3, 13)));

        let last = get_period_range(Period::LastMonth, &now(), &options);
        assert_eq!(days_of(&last), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(last.label, "Last Month");
    }

    #[test]
    fn test_last_month_in_january_wraps_year() {
        let january = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 15, 8, 0, 0)
            .unwrap();
        let last = get_period_range(Period::LastMonth, &january, &WeekOptions::default());
        assert_eq!(days_of(&last), (date(2024, 12, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_year_range() {
        let range = get_period_range(Period::Year, &now(), &WeekOptions::default());
        assert_eq!(days_of(&range), (date(2024, 1, 1), date(2024, 3, 13)));
        assert_eq!(range.label, "This Year");
    }

    #[test]
    fn test_unknown_token_falls_back_to_today() {
        let options = WeekOptions::default();
        let bogus = get_period_range(Period::parse("bogus-token"), &now(), &options);
        let today = get_period_range(Period::parse("today"), &now(), &options);
        assert_eq!(bogus.label, today.label);
        assert_eq!(bogus, today);
    }

    #[test]
    fn test_tokens_round_trip() {
        for period in Period::ALL {
            assert_eq!(Period::parse(period.as_str()), period);
        }
        let parsed: Period = serde_json::from_str("\"lastWeek\"").unwrap();
        assert_eq!(parsed, Period::LastWeek);
    }

    #[test]
    fn test_week_mode_tokens() {
        let mode: WeekMode = serde_json::from_str("\"rolling\"").unwrap();
        assert_eq!(mode, WeekMode::Rolling);
        let mode: WeekMode = serde_json::from_str("\"fortnight\"").unwrap();
        assert_eq!(mode, WeekMode::Calendar);
        assert_eq!(serde_json::to_string(&WeekMode::Rolling).unwrap(), "\"rolling\"");
    }
}
