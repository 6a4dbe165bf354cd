//! Filtering and ordering for the session history list.

use std::cmp::Ordering;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::models::{SessionRecord, SessionType};

use super::period::PeriodRange;

/// Criteria a session must meet to be listed. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionQuery {
    pub session_type: Option<SessionType>,
    /// Case-insensitive substring over name, description, notes, goal and tags.
    pub search: Option<String>,
    /// Exact tag, case-insensitive.
    pub tag: Option<String>,
    pub min_satisfaction: Option<u8>,
}

impl SessionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, session_type: Option<SessionType>) -> Self {
        self.session_type = session_type;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_min_satisfaction(mut self, rating: Option<u8>) -> Self {
        self.min_satisfaction = rating;
        self
    }

    pub fn matches(&self, session: &SessionRecord) -> bool {
        if let Some(session_type) = &self.session_type {
            if &session.session_type != session_type {
                return false;
            }
        }

        if let Some(min) = self.min_satisfaction {
            if session.satisfaction < min {
                return false;
            }
        }

        if let Some(tag) = self.tag.as_deref() {
            if !session.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let found = session
                    .text_fields()
                    .chain(std::iter::once(session.session_type.label()))
                    .any(|field| field.to_lowercase().contains(&needle));
                if !found {
                    return false;
                }
            }
        }

        true
    }
}

/// Sessions matching `query`, in input order. With a `range`, sessions whose
/// start is missing, unparseable or outside the range are dropped.
pub fn filter_sessions<'a, Tz: TimeZone>(
    sessions: &'a [SessionRecord],
    query: &SessionQuery,
    range: Option<&PeriodRange<Tz>>,
) -> Vec<&'a SessionRecord> {
    sessions
        .iter()
        .filter(|session| query.matches(session))
        .filter(|session| match range {
            None => true,
            Some(range) => match session.start_in(&range.timezone()) {
                Some(Ok(started)) => range.contains(&started),
                _ => false,
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Date,
    Duration,
    Satisfaction,
    Name,
    Type,
}

impl SortKey {
    /// Unrecognised tokens resolve to `Date`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "duration" => SortKey::Duration,
            "satisfaction" => SortKey::Satisfaction,
            "name" => SortKey::Name,
            "type" => SortKey::Type,
            _ => SortKey::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Duration => "duration",
            SortKey::Satisfaction => "satisfaction",
            SortKey::Name => "name",
            SortKey::Type => "type",
        }
    }
}

impl From<String> for SortKey {
    fn from(token: String) -> Self {
        SortKey::parse(&token)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl From<String> for SortOrder {
    fn from(token: String) -> Self {
        SortOrder::parse(&token)
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.as_str().to_string()
    }
}

impl SortOrder {
    /// `asc`/`ascending`; anything else is `Descending`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort. Sessions without a usable value for `key` (no valid start,
/// no name) go last in either order.
pub fn sort_sessions<Tz: TimeZone>(sessions: &mut [&SessionRecord], key: SortKey, order: SortOrder, tz: &Tz) {
    match key {
        SortKey::Date => {
            let mut keyed: Vec<_> = sessions
                .iter()
                .map(|session| {
                    let millis = session
                        .start_in(tz)
                        .and_then(Result::ok)
                        .map(|started| started.timestamp_millis());
                    (millis, *session)
                })
                .collect();
            keyed.sort_by(|(a, _), (b, _)| present_first(a, b, order));
            for (slot, (_, session)) in sessions.iter_mut().zip(keyed) {
                *slot = session;
            }
        }
        SortKey::Duration => sessions.sort_by(|a, b| order.apply(a.duration.cmp(&b.duration))),
        SortKey::Satisfaction => {
            sessions.sort_by(|a, b| order.apply(a.satisfaction.cmp(&b.satisfaction)))
        }
        SortKey::Name => sessions.sort_by(|a, b| {
            let a = a.name.as_deref().map(str::to_lowercase);
            let b = b.name.as_deref().map(str::to_lowercase);
            present_first(&a, &b, order)
        }),
        SortKey::Type => sessions.sort_by(|a, b| {
            order.apply(a.session_type.as_str().cmp(b.session_type.as_str()))
        }),
    }
}

fn present_first<T: Ord>(a: &Option<T>, b: &Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order.apply(a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
