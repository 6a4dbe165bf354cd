pub mod day_group;
pub mod session;

pub use day_group::DayGroup;
pub use session::{InstantValue, SessionId, SessionRecord, SessionType};
