//! Human-readable session lengths.
//!
//! Both formatters take `Option`-convertible input: `None` means the duration
//! is unknown and renders as zero. Negative values clamp to zero.

/// `"1h 2m 3s"`, `"2m 3s"`, `"3s"`.
pub fn format_duration(seconds: impl Into<Option<i64>>) -> String {
    let Some(seconds) = seconds.into() else {
        return "0s".to_string();
    };

    let (hours, minutes, secs) = split(seconds);
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Clock style: `"1:02:03"` with hours, `"2:03"` without.
pub fn format_short_duration(seconds: impl Into<Option<i64>>) -> String {
    let Some(seconds) = seconds.into() else {
        return "0:00".to_string();
    };

    let (hours, minutes, secs) = split(seconds);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Whole seconds from a float; NaN, infinities and negatives become 0.
pub fn whole_seconds(value: f64) -> i64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as i64
    } else {
        0
    }
}

/// Session durations are stored unsigned.
pub fn seconds_from_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn split(seconds: i64) -> (u64, u64, u64) {
    let total = seconds.max(0).unsigned_abs();
    (total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(3), "3s");
        assert_eq!(format_duration(65), "1m 5s");
        assert_eq!(format_duration(3600), "1h 0m 0s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
        assert_eq!(format_duration(90_061), "25h 1m 1s");
    }

    #[test]
    fn test_format_short_duration() {
        assert_eq!(format_short_duration(0), "0:00");
        assert_eq!(format_short_duration(5), "0:05");
        assert_eq!(format_short_duration(65), "1:05");
        assert_eq!(format_short_duration(600), "10:00");
        assert_eq!(format_short_duration(3725), "1:02:05");
        assert_eq!(format_short_duration(36_000), "10:00:00");
    }

    #[test]
    fn test_absent_duration() {
        assert_eq!(format_duration(None), "0s");
        assert_eq!(format_short_duration(None), "0:00");
    }

    #[test]
    fn test_negative_duration_clamps() {
        assert_eq!(format_duration(-42), "0s");
        assert_eq!(format_short_duration(-42), "0:00");
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(65.9), 65);
        assert_eq!(whole_seconds(f64::NAN), 0);
        assert_eq!(whole_seconds(f64::INFINITY), 0);
        assert_eq!(whole_seconds(-3.0), 0);
        assert_eq!(format_duration(whole_seconds(3725.4)), "1h 2m 5s");
    }

    #[test]
    fn test_seconds_from_u64_saturates() {
        assert_eq!(seconds_from_u64(90), 90);
        assert_eq!(seconds_from_u64(u64::MAX), i64::MAX);
    }
}
