//! First-exposure KPI identifier capture.
//!
//! The scheduling provider returns KPI identifiers alongside the first
//! slot fetch of a booking attempt. They must be stored exactly once per
//! attempt, however many times the page re-renders. The capture state is
//! an explicit enum and this gate is its only mutator.

use serde::{Deserialize, Serialize};

/// Telemetry correlation identifiers from the first availability fetch.
///
/// Opaque to this engine beyond storage and equality; the provider uses
/// them to measure how early an appointment was available relative to the
/// candidate's first choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiIdentifiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_available_on_or_after_today: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_available_on_or_before_preferred_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_available_on_or_after_preferred_date: Option<String>,
}

/// Whether KPI identifiers have been captured for this booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KpiCapture {
    #[default]
    NotYetCaptured,
    Captured(KpiIdentifiers),
}

impl KpiCapture {
    /// True while the gate is open: KPI identifiers should still be
    /// requested from the provider.
    pub fn should_request(&self) -> bool {
        matches!(self, KpiCapture::NotYetCaptured)
    }

    /// Store freshly returned identifiers if the gate is still open.
    ///
    /// Returns true when this call performed the capture. Re-merging
    /// identical identifiers is a no-op, and nothing is ever overwritten:
    /// once captured, later identifiers (even different ones) are dropped.
    pub fn capture_if_present(&mut self, fresh: Option<KpiIdentifiers>) -> bool {
        if !self.should_request() {
            return false;
        }
        match fresh {
            Some(identifiers) => {
                *self = KpiCapture::Captured(identifiers);
                true
            }
            None => false,
        }
    }

    /// The captured identifiers, if any.
    pub fn identifiers(&self) -> Option<&KpiIdentifiers> {
        match self {
            KpiCapture::NotYetCaptured => None,
            KpiCapture::Captured(identifiers) => Some(identifiers),
        }
    }
}
