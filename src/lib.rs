//! Session history analytics for a focus timer.
//!
//! The timer front end owns the session store and the rendering; this crate
//! turns a list of [`SessionRecord`]s into what a history view shows: formatted
//! dates and durations, day groups, streaks, period windows, summaries and
//! exports. Nothing here reads the wall clock on its own. Pass "now" in, or use
//! [`SessionInsights`] with a [`Clock`].

mod utils;

pub mod analytics;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod models;
pub mod settings;

pub use analytics::{
    active_days, calculate_streak, filter_sessions, get_period_range, group_sessions_by_day,
    longest_streak, sort_sessions, summarize_sessions, DayGrouping, Period, PeriodRange,
    SessionQuery, SessionSummary, SkippedRecord, SortKey, SortOrder, StreakPolicy, TypeBreakdown,
    WeekMode, WeekOptions,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::InstantError;
pub use export::{export_csv, export_json, export_sessions, ExportFormat};
pub use format::{
    format_date, format_datetime, format_duration, format_relative_time, format_short_duration,
    parse_instant, DateFormat, INVALID_DATE, NOT_AVAILABLE,
};
pub use insights::SessionInsights;
pub use models::{DayGroup, InstantValue, SessionId, SessionRecord, SessionType};
pub use settings::{InsightSettings, SettingsStore, WEEK_START_ENV};
