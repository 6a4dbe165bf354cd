pub mod aggregate;
pub mod filter;
pub mod period;
pub mod streak;
pub mod summary;

pub use aggregate::{group_sessions_by_day, DayGrouping, SkippedRecord};
pub use filter::{filter_sessions, sort_sessions, SessionQuery, SortKey, SortOrder};
pub use period::{get_period_range, Period, PeriodRange, WeekMode, WeekOptions};
pub use streak::{active_days, calculate_streak, longest_streak, StreakPolicy};
pub use summary::{summarize_sessions, SessionSummary, TypeBreakdown};
