use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::error::InstantError;
use crate::models::{DayGroup, SessionId, SessionRecord};

// Set to true to log skipped records
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// A record left out of an aggregation because its start time was unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub id: SessionId,
    pub error: InstantError,
}

/// Result of [`group_sessions_by_day`]: the groups plus per-record diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayGrouping {
    /// Most recent day first.
    pub groups: Vec<DayGroup>,
    pub skipped: Vec<SkippedRecord>,
}

impl DayGrouping {
    /// Every grouped session, newest day first, input order within a day.
    pub fn sessions(&self) -> impl Iterator<Item = &SessionRecord> {
        self.groups.iter().flat_map(|group| group.sessions.iter())
    }

    pub fn total_time(&self) -> u64 {
        self.groups
            .iter()
            .fold(0u64, |acc, group| acc.saturating_add(group.total_time))
    }
}

/// Group sessions by the calendar day (in `tz`) on which they started.
///
/// Records without a start time are left out silently. Records whose start
/// time cannot be parsed are left out, logged, and listed in `skipped`.
pub fn group_sessions_by_day<Tz: TimeZone>(sessions: &[SessionRecord], tz: &Tz) -> DayGrouping {
    let mut days: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();
    let mut skipped = Vec::new();

    for session in sessions {
        let started = match session.start_in(tz) {
            None => continue,
            Some(Ok(started)) => started,
            Some(Err(error)) => {
                log_warn!("skipping session {} in day grouping: {}", session.id, error);
                skipped.push(SkippedRecord {
                    id: session.id.clone(),
                    error,
                });
                continue;
            }
        };

        let day = started.date_naive();
        days.entry(day)
            .or_insert_with(|| DayGroup::new(day, tz))
            .push(session.clone());
    }

    DayGrouping {
        groups: days.into_values().rev().collect(),
        skipped,
    }
}
