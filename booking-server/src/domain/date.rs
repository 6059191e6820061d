//! Calendar dates for appointment booking.
//!
//! The booking rules all operate at day granularity ("tomorrow", "six
//! months ahead", "start of the week"), but appointment slots arrive as
//! UTC instants. This module provides a day-granularity date type plus the
//! localisation helpers that anchor day boundaries in the single reference
//! time zone, so "midnight" and "midday" mean the same thing regardless of
//! server locale.

use chrono::{Datelike, DateTime, Duration, Months, NaiveDate, TimeZone, Weekday};
use chrono_tz::Tz;
use std::fmt;
use std::ops::{Add, Sub};

/// The reference time zone for all day boundaries.
///
/// Slot start times are stored as UTC instants and converted to this zone
/// before any before/after-midday or same-day comparison.
pub const REFERENCE_ZONE: Tz = chrono_tz::Europe::London;

/// Error returned when constructing an invalid calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct InvalidDate {
    reason: &'static str,
}

impl InvalidDate {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A validated calendar date at day granularity.
///
/// Always represents the start of its day in the reference time zone.
/// There is no way to hold an invalid date: every constructor validates,
/// so code receiving a `CalendarDate` can trust it exists on the calendar.
///
/// # Examples
///
/// ```
/// use booking_server::domain::CalendarDate;
///
/// let date = CalendarDate::from_ymd(2024, 3, 15).unwrap();
/// assert_eq!(date.to_string(), "2024-03-15");
///
/// // 31 February does not exist
/// assert!(CalendarDate::from_ymd(2024, 2, 31).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Construct from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| InvalidDate::new("no such day on the calendar"))
    }

    /// Parse a strict ISO `YYYY-MM-DD` date.
    ///
    /// The input must be exactly ten characters with zero-padded month and
    /// day. This is the format used for query parameters and stored search
    /// state.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::CalendarDate;
    ///
    /// assert!(CalendarDate::parse_iso("2024-03-15").is_ok());
    /// assert!(CalendarDate::parse_iso("2024-3-15").is_err());
    /// assert!(CalendarDate::parse_iso("15-03-2024").is_err());
    /// ```
    pub fn parse_iso(s: &str) -> Result<Self, InvalidDate> {
        if s.len() != 10 {
            return Err(InvalidDate::new("expected YYYY-MM-DD"));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvalidDate::new("expected YYYY-MM-DD"))
    }

    /// Returns the underlying naive date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the weekday.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The next calendar day.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().expect("date overflow"))
    }

    /// The previous calendar day.
    pub fn pred(&self) -> Self {
        Self(self.0.pred_opt().expect("date underflow"))
    }

    /// Add a signed number of days, returning `None` on overflow.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Add whole months, clamping to the last day of the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::CalendarDate;
    ///
    /// let aug = CalendarDate::from_ymd(2023, 8, 31).unwrap();
    /// let feb = aug.add_months(6);
    /// assert_eq!(feb.to_string(), "2024-02-29");
    /// ```
    pub fn add_months(&self, months: u32) -> Self {
        Self(
            self.0
                .checked_add_months(Months::new(months))
                .expect("date overflow"),
        )
    }

    /// The first date of the week containing this date.
    ///
    /// `week_start` chooses which weekday anchors the week; the result is
    /// the closest such weekday at or before this date.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::CalendarDate;
    /// use chrono::Weekday;
    ///
    /// // 2024-03-15 is a Friday
    /// let friday = CalendarDate::from_ymd(2024, 3, 15).unwrap();
    /// assert_eq!(friday.week_anchor(Weekday::Mon).to_string(), "2024-03-11");
    /// assert_eq!(friday.week_anchor(Weekday::Sun).to_string(), "2024-03-10");
    /// ```
    pub fn week_anchor(&self, week_start: Weekday) -> Self {
        let offset = (7 + self.0.weekday().num_days_from_monday() as i64
            - week_start.num_days_from_monday() as i64)
            % 7;
        *self - Duration::days(offset)
    }

    /// Midnight at the start of this date in the given zone.
    pub fn start_of_day(&self, zone: Tz) -> DateTime<Tz> {
        localize(self.0, 0, zone)
    }

    /// Noon on this date in the given zone.
    ///
    /// This is the morning/afternoon boundary for slot partitioning.
    pub fn midday(&self, zone: Tz) -> DateTime<Tz> {
        localize(self.0, 12, zone)
    }
}

/// Resolve a wall-clock hour on a date to an instant in `zone`.
///
/// On a fall-back transition the earlier of the two instants is used. The
/// reference zone never skips midnight or noon, so the spring-forward gap
/// does not arise for the hours this crate asks for; if it ever does, the
/// nominal UTC reading keeps the result on the right date.
fn localize(date: NaiveDate, hour: u32, zone: Tz) -> DateTime<Tz> {
    let naive = date.and_hms_opt(hour, 0, 0).expect("valid wall-clock time");
    match zone.from_local_datetime(&naive) {
        chrono::LocalResult::Single(t) => t,
        chrono::LocalResult::Ambiguous(earlier, _) => earlier,
        chrono::LocalResult::None => zone.from_utc_datetime(&naive),
    }
}

impl Add<Duration> for CalendarDate {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.checked_add_signed(rhs).expect("date overflow"))
    }
}

impl Sub<Duration> for CalendarDate {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0.checked_sub_signed(rhs).expect("date underflow"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalendarDate({})", self.0)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
