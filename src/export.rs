//! Session history export (JSON and CSV).

use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::format::{format_date, format_duration, seconds_from_u64, DateFormat};
use crate::models::{InstantValue, SessionRecord};

const CSV_HEADER: &str =
    "id,type,name,startTime,endTime,duration,durationFormatted,satisfaction,tags,goal,notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl From<String> for ExportFormat {
    fn from(token: String) -> Self {
        ExportFormat::parse(&token)
    }
}

impl From<ExportFormat> for String {
    fn from(format: ExportFormat) -> Self {
        format.extension().to_string()
    }
}

impl ExportFormat {
    /// Unrecognised tokens resolve to `Json`.
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("csv") {
            ExportFormat::Csv
        } else {
            ExportFormat::Json
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// `sessions-YYYY-MM-DD.<ext>` for the day of `now`.
    pub fn file_name<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!("sessions-{}.{}", now.format("%Y-%m-%d"), self.extension())
    }
}

pub fn export_sessions<Tz>(sessions: &[SessionRecord], format: ExportFormat, now: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        ExportFormat::Json => export_json(sessions),
        ExportFormat::Csv => Ok(export_csv(sessions, now)),
    }
}

pub fn export_json(sessions: &[SessionRecord]) -> Result<String> {
    serde_json::to_string_pretty(sessions).context("Failed to serialize sessions to JSON")
}

/// One row per session. Instants are ISO 8601 UTC; `now` only supplies the
/// zone for instants stored without an offset.
pub fn export_csv<Tz>(sessions: &[SessionRecord], now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(CSV_HEADER.len() + sessions.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for session in sessions {
        let duration = seconds_from_u64(session.duration);
        let fields = [
            session.id.to_string(),
            session.session_type.as_str().to_string(),
            session.name.clone().unwrap_or_default(),
            iso_or_empty(session.start_time.as_ref(), now),
            iso_or_empty(session.end_time.as_ref(), now),
            session.duration.to_string(),
            format_duration(duration),
            session.satisfaction.to_string(),
            session.tags.join(";"),
            session.goal.clone().unwrap_or_default(),
            session.notes.clone().unwrap_or_default(),
        ];

        let row: Vec<String> = fields.iter().map(|field| escape_csv(field)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn iso_or_empty<Tz>(value: Option<&InstantValue>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value {
        Some(value) => format_date(Some(value), DateFormat::Iso, now),
        None => String::new(),
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 13, 15, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_export_format_parse_and_file_name() {
        assert_eq!(ExportFormat::parse("CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("xml"), ExportFormat::Json);
        assert_eq!(ExportFormat::Csv.file_name(&now()), "sessions-2024-03-13.csv");
        assert_eq!(ExportFormat::Json.file_name(&now()), "sessions-2024-03-13.json");
    }

    #[test]
    fn test_csv_rows() {
        let sessions = vec![
            SessionRecord::new(7, "study")
                .with_name("Essay, draft 2")
                .with_start("2024-03-13T09:00:00Z")
                .with_end("2024-03-13T10:02:05Z")
                .with_duration(3725)
                .with_satisfaction(4)
                .with_tags(["writing", "uni"]),
            SessionRecord::new("b-1", "break").with_start("garbage"),
        ];

        let csv = export_csv(&sessions, &now());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "7,study,\"Essay, draft 2\",2024-03-13T09:00:00.000Z,2024-03-13T10:02:05.000Z,3725,1h 2m 5s,4,writing;uni,,"
        );
        assert_eq!(lines[2], "b-1,break,,Invalid Date,,0,0s,0,,,");
    }

    #[test]
    fn test_csv_escapes_quotes_and_newlines() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_json_export_round_trips() {
        let sessions = vec![SessionRecord::new(1, "focus")
            .with_start("2024-03-13T09:00:00Z")
            .with_duration(1500)];

        let json = export_sessions(&sessions, ExportFormat::Json, &now()).unwrap();
        assert!(json.contains("\"startTime\": \"2024-03-13T09:00:00Z\""));
        let parsed: Vec<SessionRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sessions);
    }

    #[test]
    fn test_unknown_format_token_deserializes_as_json() {
        let format: ExportFormat = serde_json::from_str("\"CSV\"").unwrap();
        assert_eq!(format, ExportFormat::Csv);
        let format: ExportFormat = serde_json::from_str("\"xlsx\"").unwrap();
        assert_eq!(format, ExportFormat::Json);
        assert_eq!(serde_json::to_string(&ExportFormat::Csv).unwrap(), "\"csv\"");
    }
}
