//! Booking window computation.
//!
//! The legal booking window runs from tomorrow through six months ahead
//! (less one day), narrowed by any candidate-specific eligibility window.
//! An eligibility window can invert the result; that is not an error here.
//! Callers treat an inverted window as "no bookable dates".

use crate::domain::{CalendarDate, EligibilityWindow, TestType};

use super::config::BookingConfig;

/// The earliest and latest dates a candidate may choose.
///
/// `earliest <= latest` is deliberately NOT guaranteed: eligibility
/// clamping can produce an inverted window, surfaced via [`Self::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub earliest: CalendarDate,
    pub latest: CalendarDate,
}

impl BookingWindow {
    /// The global policy window: tomorrow through `months_ahead` months
    /// from today, less one day.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::CalendarDate;
    /// use booking_server::policy::BookingWindow;
    ///
    /// let today = CalendarDate::from_ymd(2024, 1, 10).unwrap();
    /// let window = BookingWindow::global(today, 6);
    /// assert_eq!(window.earliest.to_string(), "2024-01-11");
    /// assert_eq!(window.latest.to_string(), "2024-07-09");
    /// ```
    pub fn global(today: CalendarDate, months_ahead: u32) -> Self {
        Self {
            earliest: today.succ(),
            latest: today.add_months(months_ahead).pred(),
        }
    }

    /// True when clamping has inverted the window: no bookable dates.
    pub fn is_empty(&self) -> bool {
        self.earliest > self.latest
    }

    /// Closed-range membership. Always false for an inverted window.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

/// Compute the effective booking window for one candidate and test type.
///
/// The instructor re-test type ignores any supplied eligibility window
/// entirely; otherwise the eligibility bounds narrow the global window
/// where they are tighter.
pub fn compute_window(
    today: CalendarDate,
    eligibility: Option<&EligibilityWindow>,
    test_type: TestType,
    config: &BookingConfig,
) -> BookingWindow {
    let mut window = BookingWindow::global(today, config.months_ahead);

    let eligibility = if test_type.ignores_eligibility_window() {
        None
    } else {
        eligibility
    };

    if let Some(eligibility) = eligibility {
        if let Some(from) = eligibility.from {
            if from > window.earliest {
                window.earliest = from;
            }
        }
        if let Some(to) = eligibility.to {
            if to < window.latest {
                window.latest = to;
            }
        }
    }

    window
}

/// Window-edge booleans for the rendering layer.
///
/// Navigation is never refused by this engine; these flags let the view
/// disable or badge the controls instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFlags {
    /// The date is before today.
    pub is_before_today: bool,
    /// The date is past the global six-month ceiling.
    pub is_after_six_months: bool,
    /// The date is before the candidate's eligible period starts.
    pub is_before_eligible: bool,
    /// The date is after the candidate's eligible period ends.
    pub is_after_eligible: bool,
}

/// Compute edge flags for a date against the global and effective windows.
pub fn edge_flags(
    date: CalendarDate,
    today: CalendarDate,
    global: &BookingWindow,
    effective: &BookingWindow,
) -> EdgeFlags {
    EdgeFlags {
        is_before_today: date < today,
        is_after_six_months: date > global.latest,
        is_before_eligible: date < effective.earliest,
        is_after_eligible: date > effective.latest,
    }
}
