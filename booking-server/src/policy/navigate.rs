//! Paginated date navigation.
//!
//! The desktop calendar shows the full week containing the selected date;
//! the mobile calendar shows a narrower run of days starting at it. Both
//! page with plain date arithmetic and are never clamped here: whether a
//! previous/next target is actually reachable is a rendering decision
//! driven by the window edge flags.

use chrono::Duration;

use crate::domain::CalendarDate;

use super::config::BookingConfig;
use super::window::BookingWindow;

/// Derived navigation data for one render. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// The seven dates of the desktop week view.
    pub week: Vec<CalendarDate>,
    /// The mobile day window: up to `mobile_window_days` dates starting at
    /// the selected date, fewer at the window edge.
    pub mobile: Vec<CalendarDate>,
    /// Desktop paging anchors, one week either side of the selection.
    pub previous_desktop: CalendarDate,
    pub next_desktop: CalendarDate,
    /// Mobile paging anchors, one step either side of the selection.
    pub previous_mobile: CalendarDate,
    pub next_mobile: CalendarDate,
}

/// Compute the navigation widget data for a selected date.
///
/// Pure function; `window` only truncates the mobile day run so the last
/// mobile page does not dangle past the final bookable date.
pub fn navigate(
    selected: CalendarDate,
    window: &BookingWindow,
    config: &BookingConfig,
) -> NavigationState {
    let anchor = selected.week_anchor(config.week_start);
    let week = (0..7)
        .map(|i| anchor + Duration::days(i))
        .collect();

    let mobile = (0..i64::from(config.mobile_window_days))
        .map(|i| selected + Duration::days(i))
        .filter(|date| *date <= window.latest)
        .collect();

    let week_hop = Duration::days(7);
    let step = Duration::days(config.mobile_step_days);

    NavigationState {
        week,
        mobile,
        previous_desktop: selected - week_hop,
        next_desktop: selected + week_hop,
        previous_mobile: selected - step,
        next_mobile: selected + step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn wide_window() -> BookingWindow {
        BookingWindow {
            earliest: date(2020, 1, 1),
            latest: date(2030, 1, 1),
        }
    }

    #[test]
    fn week_view_contains_selected_date() {
        // 2024-03-15 is a Friday; Monday-start week is 11th..17th
        let nav = navigate(date(2024, 3, 15), &wide_window(), &BookingConfig::default());

        assert_eq!(nav.week.len(), 7);
        assert_eq!(nav.week[0], date(2024, 3, 11));
        assert_eq!(nav.week[6], date(2024, 3, 17));
        assert!(nav.week.contains(&date(2024, 3, 15)));
    }

    #[test]
    fn week_view_respects_configured_start() {
        let config = BookingConfig::default().with_week_start(Weekday::Sun);
        let nav = navigate(date(2024, 3, 15), &wide_window(), &config);

        assert_eq!(nav.week[0], date(2024, 3, 10));
        assert_eq!(nav.week[6], date(2024, 3, 16));
    }

    #[test]
    fn desktop_paging_is_one_week_unclamped() {
        let nav = navigate(date(2024, 3, 15), &wide_window(), &BookingConfig::default());

        assert_eq!(nav.previous_desktop, date(2024, 3, 8));
        assert_eq!(nav.next_desktop, date(2024, 3, 22));

        // Even right at the window floor the previous anchor still exists;
        // the edge flags tell the view to disable it
        let window = BookingWindow {
            earliest: date(2024, 3, 15),
            latest: date(2024, 9, 14),
        };
        let nav = navigate(date(2024, 3, 15), &window, &BookingConfig::default());
        assert_eq!(nav.previous_desktop, date(2024, 3, 8));
    }

    #[test]
    fn mobile_window_anchored_at_selection() {
        let nav = navigate(date(2024, 3, 15), &wide_window(), &BookingConfig::default());

        assert_eq!(
            nav.mobile,
            vec![date(2024, 3, 15), date(2024, 3, 16), date(2024, 3, 17)]
        );
        assert_eq!(nav.previous_mobile, date(2024, 3, 12));
        assert_eq!(nav.next_mobile, date(2024, 3, 18));
    }

    #[test]
    fn mobile_window_truncates_at_latest() {
        let window = BookingWindow {
            earliest: date(2024, 1, 1),
            latest: date(2024, 3, 16),
        };
        let nav = navigate(date(2024, 3, 15), &window, &BookingConfig::default());

        assert_eq!(nav.mobile, vec![date(2024, 3, 15), date(2024, 3, 16)]);

        let nav = navigate(date(2024, 3, 16), &window, &BookingConfig::default());
        assert_eq!(nav.mobile, vec![date(2024, 3, 16)]);
    }

    #[test]
    fn mobile_window_empty_past_the_edge() {
        let window = BookingWindow {
            earliest: date(2024, 1, 1),
            latest: date(2024, 3, 14),
        };
        let nav = navigate(date(2024, 3, 15), &window, &BookingConfig::default());
        assert!(nav.mobile.is_empty());
    }

    #[test]
    fn mobile_step_follows_config() {
        let config = BookingConfig::default().with_mobile_geometry(1, 1);
        let nav = navigate(date(2024, 3, 15), &wide_window(), &config);

        assert_eq!(nav.mobile, vec![date(2024, 3, 15)]);
        assert_eq!(nav.previous_mobile, date(2024, 3, 14));
        assert_eq!(nav.next_mobile, date(2024, 3, 16));
    }

    #[test]
    fn mobile_and_desktop_arithmetic_stay_consistent() {
        // Stepping the mobile view forward repeatedly covers exactly the
        // dates the desktop next-week jump lands on
        let config = BookingConfig::default();
        let selected = date(2024, 3, 11);
        let nav = navigate(selected, &wide_window(), &config);

        let hops = nav.next_mobile;
        let nav2 = navigate(hops, &wide_window(), &config);
        let twice = nav2.next_mobile;
        // 3 + 3 days, one short of the 7-day desktop hop
        assert_eq!(twice + Duration::days(1), nav.next_desktop);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn any_date()(
            year in 2015i32..2045,
            month in 1u32..=12,
            day in 1u32..=28
        ) -> CalendarDate {
            CalendarDate::from_ymd(year, month, day).unwrap()
        }
    }

    proptest! {
        /// The week view is 7 consecutive dates containing the selection.
        #[test]
        fn week_shape(selected in any_date()) {
            let window = BookingWindow {
                earliest: CalendarDate::from_ymd(2000, 1, 1).unwrap(),
                latest: CalendarDate::from_ymd(2060, 1, 1).unwrap(),
            };
            let nav = navigate(selected, &window, &BookingConfig::default());

            prop_assert_eq!(nav.week.len(), 7);
            for pair in nav.week.windows(2) {
                prop_assert_eq!(pair[0].succ(), pair[1]);
            }
            prop_assert!(nav.week.contains(&selected));
        }

        /// Paging anchors are symmetric around the selection.
        #[test]
        fn paging_symmetry(selected in any_date()) {
            let window = BookingWindow {
                earliest: CalendarDate::from_ymd(2000, 1, 1).unwrap(),
                latest: CalendarDate::from_ymd(2060, 1, 1).unwrap(),
            };
            let nav = navigate(selected, &window, &BookingConfig::default());

            prop_assert_eq!(nav.previous_desktop + Duration::days(14), nav.next_desktop);
            prop_assert_eq!(nav.previous_mobile + Duration::days(6), nav.next_mobile);
        }

        /// The mobile run never crosses the window's latest date.
        #[test]
        fn mobile_respects_edge(selected in any_date(), slack in 0i64..5) {
            let window = BookingWindow {
                earliest: CalendarDate::from_ymd(2000, 1, 1).unwrap(),
                latest: selected.checked_add_days(slack).unwrap(),
            };
            let nav = navigate(selected, &window, &BookingConfig::default());

            prop_assert!(nav.mobile.iter().all(|d| *d <= window.latest));
            prop_assert_eq!(nav.mobile.len(), (slack + 1).min(3) as usize);
        }
    }
}
