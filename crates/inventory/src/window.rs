//! The expiry alert window.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Number of days after the reference date covered by an alert.
pub const WINDOW_DAYS: u64 = 7;

/// Closed date interval `[start, end]` used to select items worth alerting on.
///
/// Forward-looking only: items that expired before `start` are outside the
/// window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AlertWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl AlertWindow {
    /// Window for reference date `as_of`: `[as_of, as_of + WINDOW_DAYS]`.
    pub fn starting(as_of: NaiveDate) -> Self {
        // Saturate at the calendar's upper bound rather than panic.
        let end = as_of
            .checked_add_days(Days::new(WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self { start: as_of, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
