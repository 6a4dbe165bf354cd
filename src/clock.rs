//! Source of "now" for the history views.
//!
//! The analytics functions never read the wall clock themselves; the facade
//! asks a `Clock` once per call and passes the instant down.

use chrono::{DateTime, Duration, Local, TimeZone};

pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: DateTime<Tz>) {
        self.now = now;
    }

    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.clone() + by;
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fixed_clock_advances_only_when_told() {
        let start = Utc.with_ymd_and_hms(2024, 3, 13, 15, 0, 0).unwrap();
        let mut clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_system_clock_is_local() {
        let before = Local::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
