//! Day/month/year form-field parsing.
//!
//! The date-entry page submits three separate text fields. They are parsed
//! strictly: composed with hyphens, the input must match one of the eight
//! accepted layouts (`D`/`DD`, `M`/`MM`, `YY`/`YYYY`) character for
//! character. Overflowing values never reinterpret: day 32 is rejected,
//! not rolled into the next month.

use super::date::CalendarDate;

/// Which near-term dates the parser rejects.
///
/// Two booking flows share this parser but disagree on whether tomorrow is
/// bookable through the form, so the rule is a parameter rather than a
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearTermPolicy {
    /// Reject only a date equal to today.
    RejectToday,
    /// Reject a date equal to today or tomorrow.
    RejectTodayAndTomorrow,
}

/// Why a submitted date was rejected.
///
/// At most one reason is ever reported per submission; earlier variants
/// take priority when several apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateRejection {
    /// Does not parse under any accepted layout, or names a day that does
    /// not exist on the calendar.
    #[error("not a valid date")]
    NotValid,

    /// Strictly before today.
    #[error("date is in the past")]
    InPast,

    /// Today (or tomorrow, depending on the active near-term policy).
    #[error("date is too soon to book")]
    TooSoon,

    /// Strictly after the last bookable date.
    #[error("date is beyond the booking horizon")]
    BeyondBookingHorizon,
}

impl DateRejection {
    /// The wire error code shown to the rendering layer.
    ///
    /// The near-term code depends on which rejection rule the flow runs
    /// with, so the active policy picks between the two variants.
    pub fn code(self, near_term: NearTermPolicy) -> &'static str {
        match self {
            DateRejection::NotValid => "dateNotValid",
            DateRejection::InPast => "dateInPast",
            DateRejection::TooSoon => match near_term {
                NearTermPolicy::RejectToday => "dateIsToday",
                NearTermPolicy::RejectTodayAndTomorrow => "dateIsTodayOrTomorrow",
            },
            DateRejection::BeyondBookingHorizon => "dateBeyond6Months",
        }
    }
}

/// Raw day/month/year strings exactly as submitted.
///
/// Never assumed numeric or zero-padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFields {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateFields {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }
}

/// Parse and validate a submitted day/month/year triple.
///
/// `horizon` is the last bookable date of the global window (today plus
/// six months minus one day under the default policy). Pure function of
/// its inputs.
///
/// # Examples
///
/// ```
/// use booking_server::domain::{parse_date_fields, CalendarDate, DateFields, DateRejection, NearTermPolicy};
///
/// let today = CalendarDate::from_ymd(2020, 1, 1).unwrap();
/// let horizon = today.add_months(6).pred();
///
/// let fields = DateFields::new("1", "1", "2020");
/// assert_eq!(
///     parse_date_fields(&fields, today, horizon, NearTermPolicy::RejectTodayAndTomorrow),
///     Err(DateRejection::TooSoon)
/// );
///
/// let fields = DateFields::new("29", "2", "2019");
/// assert_eq!(
///     parse_date_fields(&fields, today, horizon, NearTermPolicy::RejectTodayAndTomorrow),
///     Err(DateRejection::NotValid)
/// );
/// ```
pub fn parse_date_fields(
    fields: &DateFields,
    today: CalendarDate,
    horizon: CalendarDate,
    near_term: NearTermPolicy,
) -> Result<CalendarDate, DateRejection> {
    let date = parse_strict(fields).ok_or(DateRejection::NotValid)?;

    if date < today {
        return Err(DateRejection::InPast);
    }

    let too_soon = match near_term {
        NearTermPolicy::RejectToday => date == today,
        NearTermPolicy::RejectTodayAndTomorrow => date == today || date == today.succ(),
    };
    if too_soon {
        return Err(DateRejection::TooSoon);
    }

    if date > horizon {
        return Err(DateRejection::BeyondBookingHorizon);
    }

    Ok(date)
}

/// Strict layout parse: day and month are one or two digits, the year is
/// two or four digits, nothing else. Returns `None` for anything that
/// fails the layout or names a nonexistent day.
fn parse_strict(fields: &DateFields) -> Option<CalendarDate> {
    let day = parse_digits(&fields.day, 1, 2)?;
    let month = parse_digits(&fields.month, 1, 2)?;
    let year = match fields.year.len() {
        4 => parse_digits(&fields.year, 4, 4)? as i32,
        2 => expand_two_digit_year(parse_digits(&fields.year, 2, 2)?),
        _ => return None,
    };

    CalendarDate::from_ymd(year, month, day).ok()
}

/// Parse a string of `min..=max` ASCII digits into a number.
fn parse_digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max {
        return None;
    }
    let mut value: u32 = 0;
    for b in s.bytes() {
        let digit = (b as char).to_digit(10)?;
        value = value * 10 + digit;
    }
    Some(value)
}

/// Two-digit years pivot at 68: `00`-`68` are 2000s, `69`-`99` are 1900s.
fn expand_two_digit_year(yy: u32) -> i32 {
    if yy <= 68 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn parse(
        day: &str,
        month: &str,
        year: &str,
        today: CalendarDate,
    ) -> Result<CalendarDate, DateRejection> {
        parse_date_fields(
            &DateFields::new(day, month, year),
            today,
            today.add_months(6).pred(),
            NearTermPolicy::RejectTodayAndTomorrow,
        )
    }

    #[test]
    fn accepts_all_eight_layouts() {
        let today = date(2024, 3, 1);
        let expected = date(2024, 4, 5);

        // DD-MM-YYYY, D-M-YYYY, DD-M-YYYY, D-MM-YYYY
        assert_eq!(parse("05", "04", "2024", today).unwrap(), expected);
        assert_eq!(parse("5", "4", "2024", today).unwrap(), expected);
        assert_eq!(parse("05", "4", "2024", today).unwrap(), expected);
        assert_eq!(parse("5", "04", "2024", today).unwrap(), expected);

        // The two-digit-year equivalents
        assert_eq!(parse("05", "04", "24", today).unwrap(), expected);
        assert_eq!(parse("5", "4", "24", today).unwrap(), expected);
        assert_eq!(parse("05", "4", "24", today).unwrap(), expected);
        assert_eq!(parse("5", "04", "24", today).unwrap(), expected);
    }

    #[test]
    fn rejects_layout_violations() {
        let today = date(2024, 3, 1);

        assert_eq!(parse("005", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5", "004", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5", "4", "202", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5", "4", "20245", today), Err(DateRejection::NotValid));
        assert_eq!(parse("", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5", "", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5", "4", "", today), Err(DateRejection::NotValid));
        assert_eq!(parse(" 5", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("5 ", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("+5", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("a", "b", "cccc", today), Err(DateRejection::NotValid));
    }

    #[test]
    fn overflow_never_rolls_over() {
        let today = date(2024, 3, 1);

        // Day 32 must fail outright, not become the 1st of the next month
        assert_eq!(parse("32", "3", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("31", "4", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("1", "13", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("0", "3", "2024", today), Err(DateRejection::NotValid));
        assert_eq!(parse("1", "0", "2024", today), Err(DateRejection::NotValid));
    }

    #[test]
    fn nonexistent_day_is_not_valid() {
        let today = date(2019, 1, 1);

        // 2019 is not a leap year
        assert_eq!(parse("29", "2", "2019", today), Err(DateRejection::NotValid));
        // 2020 is
        assert_eq!(parse("29", "2", "2020", today).unwrap(), date(2020, 2, 29));
    }

    #[test]
    fn past_dates_rejected_as_past_not_invalid() {
        let today = date(2024, 3, 15);

        assert_eq!(parse("14", "3", "2024", today), Err(DateRejection::InPast));
        assert_eq!(parse("1", "1", "2024", today), Err(DateRejection::InPast));
        assert_eq!(parse("31", "12", "2023", today), Err(DateRejection::InPast));
    }

    #[test]
    fn today_and_tomorrow_rejected_under_default_policy() {
        let today = date(2020, 1, 1);

        assert_eq!(parse("1", "1", "2020", today), Err(DateRejection::TooSoon));
        assert_eq!(parse("2", "1", "2020", today), Err(DateRejection::TooSoon));
        assert_eq!(parse("3", "1", "2020", today).unwrap(), date(2020, 1, 3));
    }

    #[test]
    fn reject_today_policy_allows_tomorrow() {
        let today = date(2020, 1, 1);
        let horizon = today.add_months(6).pred();

        let tomorrow = parse_date_fields(
            &DateFields::new("2", "1", "2020"),
            today,
            horizon,
            NearTermPolicy::RejectToday,
        );
        assert_eq!(tomorrow.unwrap(), date(2020, 1, 2));

        let same_day = parse_date_fields(
            &DateFields::new("1", "1", "2020"),
            today,
            horizon,
            NearTermPolicy::RejectToday,
        );
        assert_eq!(same_day, Err(DateRejection::TooSoon));
    }

    #[test]
    fn beyond_horizon_rejected() {
        let today = date(2024, 1, 10);
        // Horizon is 2024-07-09

        assert_eq!(parse("9", "7", "2024", today).unwrap(), date(2024, 7, 9));
        assert_eq!(
            parse("10", "7", "2024", today),
            Err(DateRejection::BeyondBookingHorizon)
        );
        assert_eq!(
            parse("1", "1", "2025", today),
            Err(DateRejection::BeyondBookingHorizon)
        );
    }

    #[test]
    fn two_digit_year_pivot() {
        let today = date(2024, 3, 1);

        assert_eq!(parse("5", "4", "24", today).unwrap(), date(2024, 4, 5));
        // 68 -> 2068, far beyond the horizon
        assert_eq!(
            parse("1", "1", "68", today),
            Err(DateRejection::BeyondBookingHorizon)
        );
        // 99 -> 1999, in the past
        assert_eq!(parse("1", "1", "99", today), Err(DateRejection::InPast));
    }

    #[test]
    fn single_reason_reported_at_highest_priority() {
        let today = date(2024, 3, 15);

        // A malformed date in the past is NotValid, not InPast
        assert_eq!(parse("32", "1", "2020", today), Err(DateRejection::NotValid));
        // A well-formed past date is InPast even though it is also outside
        // the window
        assert_eq!(parse("1", "1", "2020", today), Err(DateRejection::InPast));
    }

    #[test]
    fn rejection_codes() {
        let both = NearTermPolicy::RejectTodayAndTomorrow;
        assert_eq!(DateRejection::NotValid.code(both), "dateNotValid");
        assert_eq!(DateRejection::InPast.code(both), "dateInPast");
        assert_eq!(DateRejection::TooSoon.code(both), "dateIsTodayOrTomorrow");
        assert_eq!(
            DateRejection::TooSoon.code(NearTermPolicy::RejectToday),
            "dateIsToday"
        );
        assert_eq!(DateRejection::BeyondBookingHorizon.code(both), "dateBeyond6Months");
    }
}
