//! Orchestrator error types.

use crate::domain::{CalendarDate, TestType};
use crate::session::BookingError;

/// Errors from the appointment selection flow.
///
/// `NoCentreChosen` means an earlier journey stage was skipped; handlers
/// redirect to centre selection rather than rendering this page. The rest
/// are bad submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The attempt has no test centre; the candidate must pick one first.
    #[error("no test centre chosen for this booking attempt")]
    NoCentreChosen,

    /// A non-exempt test type reached slot selection without its
    /// eligibility record. The eligibility stage was skipped upstream.
    #[error("no eligibility record for test type {0}")]
    MissingEligibility(TestType),

    /// The submitted slot identifier is not an ISO start instant.
    #[error("invalid slot identifier: {0}")]
    InvalidSlotId(String),

    /// The chosen slot's date is outside the bookable window.
    #[error("slot on {0} is outside the bookable window")]
    SlotOutsideWindow(CalendarDate),

    /// An out-of-order transition on the booking record.
    #[error(transparent)]
    Booking(#[from] BookingError),
}
