//! Candidate eligibility windows.

use super::date::CalendarDate;

/// A candidate- and test-type-specific range outside of which that test
/// cannot be booked. Sourced from the upstream eligibility service; an
/// absent bound means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EligibilityWindow {
    pub from: Option<CalendarDate>,
    pub to: Option<CalendarDate>,
}

impl EligibilityWindow {
    pub fn new(from: Option<CalendarDate>, to: Option<CalendarDate>) -> Self {
        Self { from, to }
    }

    /// A window bounded on both sides.
    pub fn between(from: CalendarDate, to: CalendarDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        let window = EligibilityWindow::default();
        assert_eq!(window.from, None);
        assert_eq!(window.to, None);
    }

    #[test]
    fn between_sets_both_bounds() {
        let from = CalendarDate::from_ymd(2020, 6, 1).unwrap();
        let to = CalendarDate::from_ymd(2020, 8, 1).unwrap();
        let window = EligibilityWindow::between(from, to);
        assert_eq!(window.from, Some(from));
        assert_eq!(window.to, Some(to));
    }
}
