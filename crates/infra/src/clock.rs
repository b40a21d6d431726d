//! Wall-clock access for triggers.
//!
//! Triggers read "today" exactly once per run; the runner itself only ever
//! sees the resulting reference date.

use chrono::{DateTime, Local, NaiveDate};

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Local system time.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant (tests, replays).
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_reports_local_date() {
        let at = Local.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }
}
