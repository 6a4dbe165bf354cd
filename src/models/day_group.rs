//! Per-day view over a session snapshot.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone};
use serde::Serialize;

use crate::calendar::{day_key, start_of_day};

use super::SessionRecord;

/// All sessions that started on one calendar day, with running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date_key: String,
    /// Start of the day in the grouping timezone.
    pub date: DateTime<FixedOffset>,
    pub sessions: Vec<SessionRecord>,
    /// Seconds.
    pub total_time: u64,
    pub session_count: usize,
    pub total_satisfaction: u64,
    pub avg_satisfaction: f64,
}

impl DayGroup {
    pub fn new<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Self {
        let start = start_of_day(day, tz);
        let offset = start.offset().fix();
        Self {
            date_key: day_key(day),
            date: start.with_timezone(&offset),
            sessions: Vec::new(),
            total_time: 0,
            session_count: 0,
            total_satisfaction: 0,
            avg_satisfaction: 0.0,
        }
    }

    pub fn push(&mut self, session: SessionRecord) {
        self.total_time = self.total_time.saturating_add(session.duration);
        self.total_satisfaction += u64::from(session.satisfaction);
        self.sessions.push(session);
        self.session_count = self.sessions.len();
        self.avg_satisfaction = self.average_satisfaction();
    }

    /// Mean rating over the day's sessions, 0 for an empty group.
    pub fn average_satisfaction(&self) -> f64 {
        if self.session_count == 0 {
            return 0.0;
        }
        self.total_satisfaction as f64 / self.session_count as f64
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_empty_group_has_zero_average() {
        let group = DayGroup::new(day(), &Utc);
        assert_eq!(group.session_count, 0);
        assert_eq!(group.average_satisfaction(), 0.0);
        assert_eq!(group.avg_satisfaction, 0.0);
        assert_eq!(group.date_key, "2024-03-05");
        assert_eq!(group.day(), day());
    }

    #[test]
    fn test_push_updates_totals() {
        let mut group = DayGroup::new(day(), &Utc);
        group.push(SessionRecord::new(1, "study").with_duration(1500).with_satisfaction(4));
        group.push(SessionRecord::new(2, "break").with_duration(300));

        assert_eq!(group.session_count, 2);
        assert_eq!(group.total_time, 1800);
        assert_eq!(group.total_satisfaction, 4);
        assert_eq!(group.avg_satisfaction, 2.0);
    }
}
