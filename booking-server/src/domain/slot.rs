//! Appointment slots and their per-date grouping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::centre::CentreId;
use super::date::CalendarDate;
use super::test_type::TestType;

/// A bookable appointment slot as returned by the scheduling provider.
///
/// Opaque beyond identity and start time; the start instant is the slot's
/// identifier throughout the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSlot {
    /// Start of the appointment as a UTC instant.
    pub start: DateTime<Utc>,
    /// Centre offering the slot.
    pub centre: CentreId,
    /// Test type the slot is bookable for.
    pub test_type: TestType,
}

/// Slots grouped by reference-zone local date.
///
/// Within a date, slots keep the provider's order; this layer never
/// re-sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotsByDate {
    by_date: BTreeMap<CalendarDate, Vec<AppointmentSlot>>,
}

impl SlotsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot under a date, preserving insertion order.
    pub fn push(&mut self, date: CalendarDate, slot: AppointmentSlot) {
        self.by_date.entry(date).or_default().push(slot);
    }

    /// The slots for one date, in provider order. Empty when the provider
    /// returned nothing for that date.
    pub fn for_date(&self, date: CalendarDate) -> &[AppointmentSlot] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have at least one slot, ascending.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Total number of slots across all dates.
    pub fn total_len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
