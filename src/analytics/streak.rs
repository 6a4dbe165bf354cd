use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar::days_before;
use crate::models::SessionRecord;

const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// Where the backwards walk of [`calculate_streak`] may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StreakPolicy {
    /// Start today, or yesterday when today has no session yet.
    #[default]
    IncludeYesterday,
    /// Start today; a day without a session so far breaks the streak.
    TodayOnly,
}

impl StreakPolicy {
    /// Unrecognised tokens resolve to `IncludeYesterday`.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "todayOnly" => StreakPolicy::TodayOnly,
            _ => StreakPolicy::IncludeYesterday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreakPolicy::IncludeYesterday => "includeYesterday",
            StreakPolicy::TodayOnly => "todayOnly",
        }
    }
}

impl From<String> for StreakPolicy {
    fn from(token: String) -> Self {
        StreakPolicy::parse(&token)
    }
}

impl From<StreakPolicy> for String {
    fn from(policy: StreakPolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// Distinct calendar days (in `tz`) with at least one valid start time.
pub fn active_days<Tz: TimeZone>(sessions: &[SessionRecord], tz: &Tz) -> BTreeSet<NaiveDate> {
    sessions
        .iter()
        .filter_map(|session| session.start_in(tz)?.ok())
        .map(|started| started.date_naive())
        .collect()
}

/// Consecutive days with sessions ending at today (or yesterday, per
/// `policy`). Days after today are ignored.
pub fn calculate_streak<Tz: TimeZone>(
    sessions: &[SessionRecord],
    now: &DateTime<Tz>,
    policy: StreakPolicy,
) -> u32 {
    let days = active_days(sessions, &now.timezone());
    let today = now.date_naive();

    let anchor = if days.contains(&today) {
        today
    } else {
        let yesterday = days_before(today, 1);
        match policy {
            StreakPolicy::IncludeYesterday if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let streak = run_ending_at(&days, anchor);
    log_debug!("streak anchored at {anchor}: {streak} day(s)");
    streak
}

/// Longest run of consecutive active days anywhere in the history.
pub fn longest_streak<Tz: TimeZone>(sessions: &[SessionRecord], tz: &Tz) -> u32 {
    let days = active_days(sessions, tz);

    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in &days {
        current = match previous {
            Some(prev) if prev.succ_opt() == Some(*day) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(*day);
    }
    longest
}

fn run_ending_at(days: &BTreeSet<NaiveDate>, anchor: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut current = anchor;
    while days.contains(&current) {
        streak += 1;
        match current.pred_opt() {
            Some(previous) => current = previous,
            None => break,
        }
    }
    streak
}
