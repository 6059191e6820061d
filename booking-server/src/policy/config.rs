//! Booking policy configuration.

use chrono::Weekday;

use crate::domain::NearTermPolicy;

/// Configuration parameters for the booking window and date navigation.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// How many months ahead of today the booking horizon extends.
    pub months_ahead: u32,

    /// Which near-term dates the date-entry form rejects.
    pub near_term: NearTermPolicy,

    /// Weekday that anchors the desktop week view.
    pub week_start: Weekday,

    /// Width of the mobile day window, in days.
    pub mobile_window_days: u32,

    /// How far the mobile previous/next controls move, in days.
    pub mobile_step_days: i64,
}

impl BookingConfig {
    /// Set the near-term rejection policy.
    pub fn with_near_term(mut self, near_term: NearTermPolicy) -> Self {
        self.near_term = near_term;
        self
    }

    /// Set the weekday the desktop week view starts on.
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Set the mobile window width and step.
    pub fn with_mobile_geometry(mut self, window_days: u32, step_days: i64) -> Self {
        self.mobile_window_days = window_days;
        self.mobile_step_days = step_days;
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            months_ahead: 6,
            near_term: NearTermPolicy::RejectTodayAndTomorrow,
            week_start: Weekday::Mon,
            mobile_window_days: 3,
            mobile_step_days: 3,
        }
    }
}
