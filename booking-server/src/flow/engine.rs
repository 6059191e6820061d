//! The appointment selection flow.
//!
//! Composes the booking window policy, slot fetch, partitioner, date
//! navigator, and KPI capture gate to answer "what does the candidate see
//! for this date, and what happens when they pick a slot". All date
//! policy takes an explicit `today` so tests can pin any reference date.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::{
    CalendarDate, CentreId, DateFields, DateRejection, REFERENCE_ZONE, TestType, parse_date_fields,
};
use crate::policy::{BookingConfig, BookingWindow, compute_window, edge_flags, navigate, partition};
use crate::scheduling::{MockSchedulingClient, SchedulingClient, SchedulingError, SlotsResult};
use crate::session::BookingAttempt;

use super::error::FlowError;
use super::view::{DateSelectionView, NextStep, SlotView};

/// Trait for fetching appointment slots.
///
/// This abstraction allows the flow to be tested with stub inventories
/// and call-count assertions. `preferred_date` is the first-exposure KPI
/// signal; implementations return KPI identifiers only when it is passed.
#[allow(async_fn_in_trait)]
pub trait SlotSource {
    /// Fetch slots for a centre and test type over a local-date range.
    async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError>;
}

impl SlotSource for SchedulingClient {
    async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError> {
        SchedulingClient::get_slots(self, centre, test_type, date_from, date_to, preferred_date)
            .await
    }
}

impl SlotSource for MockSchedulingClient {
    async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError> {
        MockSchedulingClient::get_slots(self, centre, test_type, date_from, date_to, preferred_date)
            .await
    }
}

/// The appointment selection orchestrator.
pub struct SelectionFlow<P> {
    provider: P,
    config: BookingConfig,
}

impl<P: SlotSource> SelectionFlow<P> {
    /// Create a new flow over a slot provider.
    pub fn new(provider: P, config: BookingConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Render the date/slot selection page for one request.
    ///
    /// The selected date comes from the request's query parameter, else
    /// the attempt's stored first selection, else the soonest navigable
    /// date. A provider failure is recovered into an error view state;
    /// a missing centre is a skipped journey stage and fails fast.
    pub async fn render(
        &self,
        attempt: &mut BookingAttempt,
        requested: Option<CalendarDate>,
        today: CalendarDate,
    ) -> Result<DateSelectionView, FlowError> {
        let centre = attempt.centre().cloned().ok_or(FlowError::NoCentreChosen)?;

        let global = BookingWindow::global(today, self.config.months_ahead);
        let effective = self.effective_window(attempt, today)?;

        let selected = requested
            .or(attempt.first_selected_date())
            .unwrap_or(effective.earliest);
        attempt.note_first_selected_date(selected);

        // One fetch covers the whole desktop week around the selection
        let fetch_from = selected.week_anchor(self.config.week_start);
        let fetch_to = fetch_from + Duration::days(6);
        let preferred = attempt.kpi_signal_date();

        debug!(
            centre = %centre,
            %selected,
            from = %fetch_from,
            to = %fetch_to,
            kpi_signal = preferred.is_some(),
            "fetching availability"
        );

        let navigation = navigate(selected, &effective, &self.config);
        let flags = edge_flags(selected, today, &global, &effective);

        match self
            .provider
            .get_slots(&centre, attempt.test_type, fetch_from, fetch_to, preferred)
            .await
        {
            Ok(result) => {
                attempt.apply_kpis(result.kpi);

                let parts = partition(
                    result.slots_by_date.for_date(selected),
                    selected,
                    REFERENCE_ZONE,
                );
                Ok(DateSelectionView {
                    selected,
                    navigation,
                    morning: parts
                        .morning
                        .iter()
                        .map(|s| SlotView::from_slot(s, REFERENCE_ZONE))
                        .collect(),
                    afternoon: parts
                        .afternoon
                        .iter()
                        .map(|s| SlotView::from_slot(s, REFERENCE_ZONE))
                        .collect(),
                    flags,
                    slots_unavailable: false,
                })
            }
            Err(e) => {
                warn!(centre = %centre, error = %e, "availability fetch failed");
                Ok(DateSelectionView {
                    selected,
                    navigation,
                    morning: Vec::new(),
                    afternoon: Vec::new(),
                    flags,
                    slots_unavailable: true,
                })
            }
        }
    }

    /// Record the candidate's chosen slot.
    ///
    /// The identifier is the slot's start instant in RFC 3339 form. Its
    /// local date must sit inside the effective booking window. While
    /// amending, the choice lands on the edit record and the next step is
    /// the check-your-change page instead of fresh confirmation.
    pub fn choose_slot(
        &self,
        attempt: &mut BookingAttempt,
        slot_id: &str,
        today: CalendarDate,
    ) -> Result<NextStep, FlowError> {
        let start: DateTime<Utc> = DateTime::parse_from_rfc3339(slot_id)
            .map_err(|_| FlowError::InvalidSlotId(slot_id.to_string()))?
            .with_timezone(&Utc);

        let effective = self.effective_window(attempt, today)?;
        let local_date: CalendarDate = start.with_timezone(&REFERENCE_ZONE).date_naive().into();
        if !effective.contains(local_date) {
            return Err(FlowError::SlotOutsideWindow(local_date));
        }

        attempt.record_slot(start)?;
        debug!(slot = %slot_id, amending = attempt.is_amending(), "slot recorded");

        if attempt.is_amending() {
            Ok(NextStep::CheckChange)
        } else {
            Ok(NextStep::ConfirmAppointment)
        }
    }

    /// The eligibility-clamped booking window for this attempt.
    ///
    /// An attempt that reached slot selection without an eligibility
    /// record means an upstream journey stage was skipped; that is a
    /// defect, not a state to default around. The exempt re-test type is
    /// the exception since its record is never consulted anyway.
    fn effective_window(
        &self,
        attempt: &BookingAttempt,
        today: CalendarDate,
    ) -> Result<BookingWindow, FlowError> {
        if attempt.eligibility.is_none() && !attempt.test_type.ignores_eligibility_window() {
            return Err(FlowError::MissingEligibility(attempt.test_type));
        }
        Ok(compute_window(
            today,
            attempt.eligibility.as_ref(),
            attempt.test_type,
            &self.config,
        ))
    }

    /// Validate a day/month/year form submission.
    ///
    /// Returns the validated date to re-render the calendar on, or the
    /// single highest-priority rejection reason.
    pub fn enter_date(
        &self,
        fields: &DateFields,
        today: CalendarDate,
    ) -> Result<CalendarDate, DateRejection> {
        let horizon = BookingWindow::global(today, self.config.months_ahead).latest;
        parse_date_fields(fields, today, horizon, self.config.near_term)
    }
}
