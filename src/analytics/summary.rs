use std::collections::HashMap;

use serde::Serialize;

use crate::models::{SessionRecord, SessionType};

/// Time spent per session type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    pub session_type: SessionType,
    pub session_count: usize,
    pub total_time: u64,
    /// Share of the overall time, 0-100 with two decimals.
    pub percentage: f64,
}

/// Headline numbers for a list of sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_count: usize,
    pub total_time: u64,
    pub average_duration: f64,
    /// Sessions with a non-zero rating.
    pub rated_count: usize,
    /// Mean over rated sessions only.
    pub average_satisfaction: f64,
    pub by_type: Vec<TypeBreakdown>,
}

pub fn summarize_sessions<'a>(sessions: impl IntoIterator<Item = &'a SessionRecord>) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut type_map: HashMap<SessionType, TypeBreakdown> = HashMap::new();
    let mut rating_total: u64 = 0;

    for session in sessions {
        summary.session_count += 1;
        summary.total_time = summary.total_time.saturating_add(session.duration);
        if session.satisfaction > 0 {
            summary.rated_count += 1;
            rating_total += u64::from(session.satisfaction);
        }

        let breakdown = type_map
            .entry(session.session_type.clone())
            .or_insert_with(|| TypeBreakdown {
                session_type: session.session_type.clone(),
                session_count: 0,
                total_time: 0,
                percentage: 0.0,
            });
        breakdown.session_count += 1;
        breakdown.total_time = breakdown.total_time.saturating_add(session.duration);
    }

    if summary.session_count > 0 {
        summary.average_duration = round2(summary.total_time as f64 / summary.session_count as f64);
    }
    if summary.rated_count > 0 {
        summary.average_satisfaction = round2(rating_total as f64 / summary.rated_count as f64);
    }

    let total_time = summary.total_time;
    let mut by_type: Vec<_> = type_map
        .into_values()
        .map(|mut breakdown| {
            breakdown.percentage = if total_time > 0 {
                round2(breakdown.total_time as f64 / total_time as f64 * 100.0)
            } else {
                0.0
            };
            breakdown
        })
        .collect();

    // Most time first; ties by tag for a stable order
    by_type.sort_by(|a, b| {
        b.total_time
            .cmp(&a.total_time)
            .then_with(|| a.session_type.as_str().cmp(b.session_type.as_str()))
    });
    summary.by_type = by_type;

    summary
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
