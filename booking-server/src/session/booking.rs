//! The booking attempt record.
//!
//! One `BookingAttempt` tracks a candidate's not-yet-confirmed booking
//! across requests. The stage is a tagged enum rather than a bag of
//! optional fields, so "no centre yet" vs "centre chosen" vs "slot chosen"
//! are distinct states and a skipped journey stage surfaces as a typed
//! error instead of a silent default.

use chrono::{DateTime, Utc};

use crate::domain::{CalendarDate, CentreId, EligibilityWindow, TestType};

use super::kpi::{KpiCapture, KpiIdentifiers};

/// Errors raised when a transition is attempted out of order.
///
/// These indicate an upstream journey stage was skipped; handlers fail
/// loudly rather than patching the record up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The attempt has no test centre yet.
    #[error("no test centre chosen for this booking attempt")]
    NoCentreChosen,

    /// Amendment was requested but there is no confirmed slot to amend.
    #[error("no confirmed slot to amend")]
    NothingToAmend,
}

/// Where the attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Fresh attempt; the centre-search flow has not completed.
    NoCentre,
    /// Centre chosen, candidate is picking a date and slot.
    DateSelection { centre: CentreId },
    /// A slot has been recorded; next stop is confirmation.
    SlotChosen {
        centre: CentreId,
        slot_start: DateTime<Utc>,
    },
}

/// Which prior step the candidate chose to alter when re-scheduling.
///
/// Remembered for the whole sub-flow: back-navigation from the slot page
/// returns to a different page depending on this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTarget {
    Time,
    Date,
    Location,
}

impl ChangeTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "time" => Some(ChangeTarget::Time),
            "date" => Some(ChangeTarget::Date),
            "location" => Some(ChangeTarget::Location),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeTarget::Time => "time",
            ChangeTarget::Date => "date",
            ChangeTarget::Location => "location",
        }
    }
}

/// The parallel record written while amending an existing booking.
///
/// Re-scheduling runs the same selection flow but must not disturb the
/// confirmed primary fields until the change is checked and saved, so new
/// choices land here instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRecord {
    pub centre: Option<CentreId>,
    pub slot_start: Option<DateTime<Utc>>,
}

/// The in-progress record of one candidate's booking.
#[derive(Debug, Clone)]
pub struct BookingAttempt {
    /// Test category being booked.
    pub test_type: TestType,

    /// Eligibility window for this candidate and test type. `None` means
    /// the eligibility stage has not run yet; a consulted candidate with
    /// no constraints carries an unbounded window instead.
    pub eligibility: Option<EligibilityWindow>,

    stage: Stage,
    kpi: KpiCapture,
    first_selected_date: Option<CalendarDate>,
    first_selected_centre: Option<CentreId>,
    edit: Option<(ChangeTarget, EditRecord)>,
}

impl BookingAttempt {
    /// Start a fresh attempt for a test type.
    pub fn new(test_type: TestType) -> Self {
        Self {
            test_type,
            eligibility: None,
            stage: Stage::NoCentre,
            kpi: KpiCapture::default(),
            first_selected_date: None,
            first_selected_centre: None,
            edit: None,
        }
    }

    /// Attach an eligibility window.
    pub fn with_eligibility(mut self, eligibility: EligibilityWindow) -> Self {
        self.eligibility = Some(eligibility);
        self
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The centre the selection flow should use: the edit record's centre
    /// while amending a location change, otherwise the primary one.
    pub fn centre(&self) -> Option<&CentreId> {
        if let Some((_, edit)) = &self.edit {
            if let Some(centre) = &edit.centre {
                return Some(centre);
            }
        }
        match &self.stage {
            Stage::NoCentre => None,
            Stage::DateSelection { centre } => Some(centre),
            Stage::SlotChosen { centre, .. } => Some(centre),
        }
    }

    /// Record a chosen centre.
    ///
    /// While amending, the centre lands on the edit record; otherwise the
    /// attempt moves to date selection. The first centre ever chosen is
    /// also remembered separately for telemetry.
    pub fn choose_centre(&mut self, centre: CentreId) {
        if self.first_selected_centre.is_none() {
            self.first_selected_centre = Some(centre.clone());
        }
        if let Some((_, edit)) = &mut self.edit {
            edit.centre = Some(centre);
            return;
        }
        self.stage = Stage::DateSelection { centre };
    }

    /// Record the chosen slot's start instant.
    ///
    /// While amending, the slot lands on the edit record. A fresh attempt
    /// must already have a centre; re-picking before confirmation just
    /// replaces the previous choice.
    pub fn record_slot(&mut self, slot_start: DateTime<Utc>) -> Result<(), BookingError> {
        if let Some((_, edit)) = &mut self.edit {
            edit.slot_start = Some(slot_start);
            return Ok(());
        }
        match &self.stage {
            Stage::NoCentre => Err(BookingError::NoCentreChosen),
            Stage::DateSelection { centre } | Stage::SlotChosen { centre, .. } => {
                self.stage = Stage::SlotChosen {
                    centre: centre.clone(),
                    slot_start,
                };
                Ok(())
            }
        }
    }

    /// Enter re-scheduling mode for a confirmed slot.
    pub fn begin_edit(&mut self, change: ChangeTarget) -> Result<(), BookingError> {
        match self.stage {
            Stage::SlotChosen { .. } => {
                self.edit = Some((change, EditRecord::default()));
                Ok(())
            }
            _ => Err(BookingError::NothingToAmend),
        }
    }

    /// Abandon re-scheduling, discarding the edit record.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// True while choices are being routed to the edit record.
    pub fn is_amending(&self) -> bool {
        self.edit.is_some()
    }

    /// The change the candidate asked to make, while amending.
    pub fn change_target(&self) -> Option<ChangeTarget> {
        self.edit.as_ref().map(|(change, _)| *change)
    }

    pub fn edit_record(&self) -> Option<&EditRecord> {
        self.edit.as_ref().map(|(_, edit)| edit)
    }

    /// Remember the first date the candidate ever landed on, once.
    pub fn note_first_selected_date(&mut self, date: CalendarDate) {
        if self.first_selected_date.is_none() {
            self.first_selected_date = Some(date);
        }
    }

    pub fn first_selected_date(&self) -> Option<CalendarDate> {
        self.first_selected_date
    }

    pub fn first_selected_centre(&self) -> Option<&CentreId> {
        self.first_selected_centre.as_ref()
    }

    /// The preferred-date signal to send upstream: the first selected
    /// date, suppressed once KPI identifiers have been captured so repeat
    /// renders never re-trigger the provider's KPI path.
    pub fn kpi_signal_date(&self) -> Option<CalendarDate> {
        if self.kpi.should_request() {
            self.first_selected_date
        } else {
            None
        }
    }

    pub fn kpi(&self) -> &KpiCapture {
        &self.kpi
    }

    /// Apply freshly returned KPI identifiers through the capture gate.
    pub fn apply_kpis(&mut self, fresh: Option<KpiIdentifiers>) -> bool {
        self.kpi.capture_if_present(fresh)
    }
}
