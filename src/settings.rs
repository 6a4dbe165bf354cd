use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{
    env, fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
};

use crate::analytics::{StreakPolicy, WeekMode, WeekOptions};
use crate::format::DateFormat;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Overrides `weekStart` from the settings file, e.g. `sunday`.
pub const WEEK_START_ENV: &str = "FOCUS_HISTORY_WEEK_START";

/// Each field falls back to its default on its own, so one bad value in the
/// file does not reset the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightSettings {
    #[serde(deserialize_with = "lenient_weekday")]
    pub week_start: Weekday,
    #[serde(deserialize_with = "lenient_token")]
    pub week_mode: WeekMode,
    #[serde(deserialize_with = "lenient_token")]
    pub streak_policy: StreakPolicy,
    /// Format used by list rows when the caller does not pick one.
    #[serde(deserialize_with = "lenient_token")]
    pub date_format: DateFormat,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            week_mode: WeekMode::Calendar,
            streak_policy: StreakPolicy::IncludeYesterday,
            date_format: DateFormat::Medium,
        }
    }
}

impl InsightSettings {
    pub fn week_options(&self) -> WeekOptions {
        WeekOptions {
            week_start: self.week_start,
            mode: self.week_mode,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<InsightSettings>,
}

impl SettingsStore {
    /// Missing or unreadable-as-JSON files fall back to defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let mut data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("ignoring malformed settings at {}: {err}", path.display());
                InsightSettings::default()
            })
        } else {
            InsightSettings::default()
        };

        if let Some(week_start) = week_start_override(env::var(WEEK_START_ENV).ok()) {
            log_info!("week start overridden to {week_start} by {WEEK_START_ENV}");
            data.week_start = week_start;
        }

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> InsightSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update(&self, settings: InsightSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: InsightSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;
        Ok(())
    }

    fn persist(&self, data: &InsightSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// Strings go through the type's own fallback parsing; any other JSON value
/// gives the default.
fn lenient_token<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(token) => T::from(token),
        _ => T::default(),
    })
}

fn lenient_weekday<'de, D>(deserializer: D) -> std::result::Result<Weekday, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::String(token) => token.trim().parse::<Weekday>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or(Weekday::Mon))
}

fn week_start_override(value: Option<String>) -> Option<Weekday> {
    let value = value?;
    match value.trim().parse::<Weekday>() {
        Ok(day) => Some(day),
        Err(_) => {
            log_warn!("ignoring {WEEK_START_ENV}={value}: not a weekday");
            None
        }
    }
}
