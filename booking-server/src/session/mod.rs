//! Per-candidate booking session state.
//!
//! The surrounding server owns session persistence and serialises requests
//! per session; this module owns the shape of the booking attempt record
//! and the once-only KPI capture gate that lives inside it.

mod booking;
mod kpi;

pub use booking::{BookingAttempt, BookingError, ChangeTarget, EditRecord, Stage};
pub use kpi::{KpiCapture, KpiIdentifiers};
