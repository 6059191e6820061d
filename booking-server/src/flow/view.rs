//! View models handed to the rendering layer.

use chrono::SecondsFormat;
use chrono_tz::Tz;

use crate::domain::{AppointmentSlot, CalendarDate};
use crate::policy::{EdgeFlags, NavigationState};

/// One slot as presented to the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    /// Opaque identifier submitted back on selection: the slot's start
    /// instant in RFC 3339 form, which the provider recognises.
    pub slot_id: String,

    /// Start time as wall-clock text in the reference zone, `HH:MM`.
    pub local_time: String,
}

impl SlotView {
    /// Build from a domain slot, localising to `zone`.
    pub fn from_slot(slot: &AppointmentSlot, zone: Tz) -> Self {
        let local = slot.start.with_timezone(&zone);
        Self {
            slot_id: slot.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            local_time: local.format("%H:%M").to_string(),
        }
    }
}

/// Everything the date/slot selection page needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelectionView {
    /// The date the calendar is focused on.
    pub selected: CalendarDate,

    /// Week and mobile navigation widget data.
    pub navigation: NavigationState,

    /// Slots for the selected date, split at midday, provider order.
    pub morning: Vec<SlotView>,
    pub afternoon: Vec<SlotView>,

    /// Window-edge booleans for disabling/badging controls.
    pub flags: EdgeFlags,

    /// True when the provider could not be reached; the page shows a
    /// generic availability error instead of an empty calendar.
    pub slots_unavailable: bool,
}

/// Where the candidate goes after picking a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Fresh booking: on to the confirmation step.
    ConfirmAppointment,
    /// Amending an existing booking: on to the check-your-change step.
    CheckChange,
}
