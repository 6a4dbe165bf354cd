//! Session records as handed over by the session store.
//!
//! The store is owned elsewhere and loosely typed, so every field is deserialised
//! leniently: missing values fall back to defaults and loosely typed values
//! (numeric or string ids, fractional durations) are normalised here.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::InstantError;
use crate::format::instant::parse_instant;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionId::Number(id) => write!(f, "{id}"),
            SessionId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        SessionId::Number(id)
    }
}

impl From<i32> for SessionId {
    fn from(id: i32) -> Self {
        SessionId::Number(i64::from(id))
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::Text(id.to_string())
    }
}

/// Category of a session. Tags outside the known set are kept verbatim in
/// `Other` and rendered with the fallback style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionType {
    Study,
    Work,
    #[default]
    Focus,
    Break,
    Other(String),
}

impl SessionType {
    pub fn as_str(&self) -> &str {
        match self {
            SessionType::Study => "study",
            SessionType::Work => "work",
            SessionType::Focus => "focus",
            SessionType::Break => "break",
            SessionType::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SessionType::Study => "Study",
            SessionType::Work => "Work",
            SessionType::Focus => "Focus",
            SessionType::Break => "Break",
            SessionType::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SessionType::Other(_))
    }
}

impl From<String> for SessionType {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "study" => SessionType::Study,
            "work" => SessionType::Work,
            "focus" | "" => SessionType::Focus,
            "break" => SessionType::Break,
            _ => SessionType::Other(tag),
        }
    }
}

impl From<&str> for SessionType {
    fn from(tag: &str) -> Self {
        SessionType::from(tag.to_string())
    }
}

impl From<SessionType> for String {
    fn from(session_type: SessionType) -> Self {
        session_type.as_str().to_string()
    }
}

/// A point in time as the store wrote it: epoch milliseconds or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstantValue {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl<Tz: TimeZone> From<DateTime<Tz>> for InstantValue {
    fn from(dt: DateTime<Tz>) -> Self {
        InstantValue::Millis(dt.timestamp_millis())
    }
}

impl From<&str> for InstantValue {
    fn from(text: &str) -> Self {
        InstantValue::Text(text.to_string())
    }
}

impl From<String> for InstantValue {
    fn from(text: String) -> Self {
        InstantValue::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: SessionId,
    #[serde(rename = "type", default)]
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_instant")]
    pub start_time: Option<InstantValue>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_instant")]
    pub end_time: Option<InstantValue>,
    /// Elapsed seconds.
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub duration: u64,
    /// 0-5 rating, 0 when unrated.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub satisfaction: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

impl SessionRecord {
    pub fn new(id: impl Into<SessionId>, session_type: impl Into<SessionType>) -> Self {
        Self {
            id: id.into(),
            session_type: session_type.into(),
            start_time: None,
            end_time: None,
            duration: 0,
            satisfaction: 0,
            name: None,
            description: None,
            notes: None,
            goal: None,
            tags: Vec::new(),
        }
    }

    pub fn with_start(mut self, start: impl Into<InstantValue>) -> Self {
        self.start_time = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<InstantValue>) -> Self {
        self.end_time = Some(end.into());
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_satisfaction(mut self, rating: u8) -> Self {
        self.satisfaction = rating;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Start instant in `tz`; `None` when the record has no start time.
    pub fn start_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<Result<DateTime<Tz>, InstantError>> {
        self.start_time
            .as_ref()
            .map(|value| parse_instant(value, tz))
    }

    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Free-text fields and tags, for search.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.description, &self.notes, &self.goal]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .chain(self.tags.iter().map(String::as_str))
    }
}

/// Numbers and strings map onto [`InstantValue`]; null is absent. Anything
/// else is kept as its JSON text so it fails to parse later and the record
/// is reported instead of failing the whole batch.
fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<InstantValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(number) => Some(match number.as_i64() {
            Some(ms) => InstantValue::Millis(ms),
            None => InstantValue::FractionalMillis(number.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(text) => Some(InstantValue::Text(text)),
        other => Some(InstantValue::Text(other.to_string())),
    })
}

/// Accepts integers, floats (floored), negatives (clamped to 0) and null.
fn lenient_whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(v) if v.is_finite() && v > 0.0 => v.floor() as u64,
        _ => 0,
    })
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_whole_number(deserializer)?;
    Ok(value.min(u64::from(u8::MAX)) as u8)
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
