//! Morning/afternoon slot partitioning.

use chrono_tz::Tz;

use crate::domain::{AppointmentSlot, CalendarDate};

/// A day's slots split at midday. Order within each half is the provider
/// order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayParts {
    pub morning: Vec<AppointmentSlot>,
    pub afternoon: Vec<AppointmentSlot>,
}

/// Split a day's slots at noon local time.
///
/// The boundary is 12:00:00 on `selected` in the reference zone, NOT in
/// UTC: each slot's UTC start is converted before comparing, so a 12:30
/// UTC slot in British summer lands in the afternoon at 13:30 local. A
/// slot strictly before the boundary is morning; at or after, afternoon.
pub fn partition(slots: &[AppointmentSlot], selected: CalendarDate, zone: Tz) -> DayParts {
    let boundary = selected.midday(zone);

    let mut parts = DayParts::default();
    for slot in slots {
        if slot.start.with_timezone(&zone) < boundary {
            parts.morning.push(slot.clone());
        } else {
            parts.afternoon.push(slot.clone());
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CentreId, REFERENCE_ZONE, TestType};
    use chrono::{TimeZone, Utc};

    fn slot_utc(y: i32, m: u32, d: u32, hour: u32, min: u32) -> AppointmentSlot {
        AppointmentSlot {
            start: Utc.with_ymd_and_hms(y, m, d, hour, min, 0).unwrap(),
            centre: CentreId::parse("leeds-1").unwrap(),
            test_type: TestType::Car,
        }
    }

    #[test]
    fn splits_at_noon() {
        // January: GMT, local == UTC
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        let slots = vec![
            slot_utc(2024, 1, 15, 8, 30),
            slot_utc(2024, 1, 15, 11, 59),
            slot_utc(2024, 1, 15, 12, 0),
            slot_utc(2024, 1, 15, 15, 0),
        ];

        let parts = partition(&slots, date, REFERENCE_ZONE);

        assert_eq!(parts.morning, vec![slots[0].clone(), slots[1].clone()]);
        assert_eq!(parts.afternoon, vec![slots[2].clone(), slots[3].clone()]);
    }

    #[test]
    fn boundary_is_local_not_utc() {
        // July: BST (UTC+1). 11:30 UTC is 12:30 local, so afternoon even
        // though it reads as morning in UTC.
        let date = CalendarDate::from_ymd(2024, 7, 15).unwrap();
        let slots = vec![
            slot_utc(2024, 7, 15, 10, 59), // 11:59 local
            slot_utc(2024, 7, 15, 11, 0),  // 12:00 local
            slot_utc(2024, 7, 15, 11, 30), // 12:30 local
        ];

        let parts = partition(&slots, date, REFERENCE_ZONE);

        assert_eq!(parts.morning.len(), 1);
        assert_eq!(parts.afternoon.len(), 2);
    }

    #[test]
    fn preserves_input_order_within_halves() {
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        // Provider order deliberately not time-sorted
        let slots = vec![
            slot_utc(2024, 1, 15, 11, 0),
            slot_utc(2024, 1, 15, 9, 0),
            slot_utc(2024, 1, 15, 16, 0),
            slot_utc(2024, 1, 15, 13, 0),
        ];

        let parts = partition(&slots, date, REFERENCE_ZONE);

        assert_eq!(parts.morning, vec![slots[0].clone(), slots[1].clone()]);
        assert_eq!(parts.afternoon, vec![slots[2].clone(), slots[3].clone()]);
    }

    #[test]
    fn empty_input() {
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        let parts = partition(&[], date, REFERENCE_ZONE);
        assert!(parts.morning.is_empty());
        assert!(parts.afternoon.is_empty());
    }
}
