//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::flow::{DateSelectionView, FlowError, NextStep, SlotView};
use crate::session::BookingError;

/// Request to start a booking session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Test category, e.g. "car"
    pub test_type: String,
}

/// Response carrying the new session id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// Request to record the chosen test centre on a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseCentreRequest {
    pub session_id: String,

    /// Centre identifier from the centre-search service
    pub centre: String,

    /// Optional eligibility bounds from the eligibility service, ISO dates
    pub eligibility_from: Option<String>,
    pub eligibility_to: Option<String>,
}

/// Query for the date/slot selection page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsQuery {
    pub session_id: String,

    /// Optional selected date, ISO `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Request to record a chosen slot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseSlotRequest {
    pub session_id: String,

    /// The slot's start instant, as rendered in the slot list
    pub slot_id: String,
}

/// Response after a slot is recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseSlotResponse {
    /// Next navigation target
    pub next: &'static str,
}

/// The day/month/year date-entry form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterDateRequest {
    pub session_id: String,
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Response for a valid date-entry submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterDateResponse {
    /// The validated date to re-render the calendar on
    pub date: String,
}

/// Request to enter re-scheduling mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginEditRequest {
    pub session_id: String,

    /// Which step is being altered: "time", "date" or "location"
    pub change: String,
}

/// A slot in the selection page response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResult {
    pub slot_id: String,
    pub local_time: String,
}

impl From<SlotView> for SlotResult {
    fn from(view: SlotView) -> Self {
        Self {
            slot_id: view.slot_id,
            local_time: view.local_time,
        }
    }
}

/// The date/slot selection page view model.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectionResponse {
    /// The date the calendar is focused on
    pub selected_date: String,

    /// The seven desktop week-view dates
    pub week_view: Vec<String>,

    /// The mobile day-window dates (fewer at the window edge)
    pub week_view_mobile: Vec<String>,

    /// Paging anchors
    pub previous_desktop: String,
    pub next_desktop: String,
    pub previous_mobile: String,
    pub next_mobile: String,

    /// Slots for the selected date, split at midday
    pub morning: Vec<SlotResult>,
    pub afternoon: Vec<SlotResult>,

    /// Window-edge flags for the navigation controls
    pub is_before_today: bool,
    pub is_after_six_months: bool,
    pub is_before_eligible: bool,
    pub is_after_eligible: bool,

    /// True when availability could not be fetched
    pub slots_unavailable: bool,
}

impl From<DateSelectionView> for DateSelectionResponse {
    fn from(view: DateSelectionView) -> Self {
        Self {
            selected_date: view.selected.to_string(),
            week_view: view.navigation.week.iter().map(|d| d.to_string()).collect(),
            week_view_mobile: view
                .navigation
                .mobile
                .iter()
                .map(|d| d.to_string())
                .collect(),
            previous_desktop: view.navigation.previous_desktop.to_string(),
            next_desktop: view.navigation.next_desktop.to_string(),
            previous_mobile: view.navigation.previous_mobile.to_string(),
            next_mobile: view.navigation.next_mobile.to_string(),
            morning: view.morning.into_iter().map(Into::into).collect(),
            afternoon: view.afternoon.into_iter().map(Into::into).collect(),
            is_before_today: view.flags.is_before_today,
            is_after_six_months: view.flags.is_after_six_months,
            is_before_eligible: view.flags.is_before_eligible,
            is_after_eligible: view.flags.is_after_eligible,
            slots_unavailable: view.slots_unavailable,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application-level errors mapped to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request input
    BadRequest { message: String },

    /// A date-entry rejection, carrying its wire code
    DateRejected { code: &'static str },

    /// Unknown session id
    SessionNotFound,

    /// The attempt has no centre yet; the candidate is sent back to
    /// centre selection
    NoCentreChosen,

    /// A skipped-journey-stage defect surfaced; logged and returned as a
    /// server error rather than papered over
    Internal { message: String },
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.into(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message } => Self::bad_request(message),
            AppError::DateRejected { code } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: code.to_string(),
                }),
            )
                .into_response(),
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "unknown session".to_string(),
                }),
            )
                .into_response(),
            AppError::NoCentreChosen => Redirect::to("/centres/search").into_response(),
            AppError::Internal { message } => {
                tracing::error!(%message, "journey invariant violated");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::NoCentreChosen | FlowError::Booking(BookingError::NoCentreChosen) => {
                AppError::NoCentreChosen
            }
            FlowError::MissingEligibility(_) => AppError::Internal {
                message: err.to_string(),
            },
            other => AppError::BadRequest {
                message: other.to_string(),
            },
        }
    }
}

impl NextStep {
    /// Wire name of the next navigation target.
    pub fn as_target(self) -> &'static str {
        match self {
            NextStep::ConfirmAppointment => "confirm-appointment",
            NextStep::CheckChange => "check-change",
        }
    }
}
