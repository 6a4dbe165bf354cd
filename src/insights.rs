//! Entry point for a history view: binds a [`Clock`] and the user's
//! [`InsightSettings`] and forwards to the pure functions in `analytics`,
//! `format` and `export`.
//!
//! Every method reads the clock once, so all values produced by one call
//! agree on what "now" is.

use std::fmt::Display;

use anyhow::Result;
use chrono::TimeZone;

use crate::analytics::{
    calculate_streak, filter_sessions, get_period_range, group_sessions_by_day, longest_streak,
    summarize_sessions, DayGrouping, Period, PeriodRange, SessionQuery, SessionSummary,
};
use crate::clock::{Clock, SystemClock};
use crate::export::{export_sessions, ExportFormat};
use crate::format::{format_date, DateFormat};
use crate::models::{InstantValue, SessionRecord};
use crate::settings::{InsightSettings, SettingsStore};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

pub struct SessionInsights<C: Clock = SystemClock> {
    clock: C,
    settings: InsightSettings,
}

impl SessionInsights<SystemClock> {
    /// Wall clock, settings taken from `store`.
    pub fn from_store(store: &SettingsStore) -> Self {
        Self::new(SystemClock, store.get())
    }
}

impl<C> SessionInsights<C>
where
    C: Clock,
    <C::Tz as TimeZone>::Offset: Display,
{
    pub fn new(clock: C, settings: InsightSettings) -> Self {
        Self { clock, settings }
    }

    pub fn settings(&self) -> &InsightSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: InsightSettings) {
        self.settings = settings;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn format_date(&self, instant: Option<&InstantValue>, format: DateFormat) -> String {
        format_date(instant, format, &self.clock.now())
    }

    /// Uses the configured `date_format`.
    pub fn format_date_default(&self, instant: Option<&InstantValue>) -> String {
        self.format_date(instant, self.settings.date_format)
    }

    pub fn group_by_day(&self, sessions: &[SessionRecord]) -> DayGrouping {
        group_sessions_by_day(sessions, &self.clock.now().timezone())
    }

    pub fn streak(&self, sessions: &[SessionRecord]) -> u32 {
        calculate_streak(sessions, &self.clock.now(), self.settings.streak_policy)
    }

    pub fn longest_streak(&self, sessions: &[SessionRecord]) -> u32 {
        longest_streak(sessions, &self.clock.now().timezone())
    }

    pub fn period_range(&self, period: Period) -> PeriodRange<C::Tz> {
        get_period_range(period, &self.clock.now(), &self.settings.week_options())
    }

    pub fn sessions_in_period<'a>(
        &self,
        sessions: &'a [SessionRecord],
        period: Period,
        query: &SessionQuery,
    ) -> Vec<&'a SessionRecord> {
        let range = self.period_range(period);
        let matched = filter_sessions(sessions, query, Some(&range));
        log_debug!(
            "{} of {} sessions fall in {}",
            matched.len(),
            sessions.len(),
            period.as_str()
        );
        matched
    }

    /// Summary of the sessions started within `period`.
    pub fn summary(&self, sessions: &[SessionRecord], period: Period) -> SessionSummary {
        summarize_sessions(self.sessions_in_period(sessions, period, &SessionQuery::default()))
    }

    pub fn export(&self, sessions: &[SessionRecord], format: ExportFormat) -> Result<String> {
        export_sessions(sessions, format, &self.clock.now())
    }

    pub fn export_file_name(&self, format: ExportFormat) -> String {
        format.file_name(&self.clock.now())
    }
}
