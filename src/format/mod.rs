pub mod date;
pub mod duration;
pub mod instant;

pub use date::{format_date, format_datetime, format_relative_time, DateFormat, INVALID_DATE, NOT_AVAILABLE};
pub use duration::{format_duration, format_short_duration, seconds_from_u64, whole_seconds};
pub use instant::parse_instant;
