//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post, put},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::domain::{
    CalendarDate, CentreId, DateFields, EligibilityWindow, REFERENCE_ZONE, TestType,
};
use crate::session::{BookingAttempt, ChangeTarget};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session", post(start_session))
        .route("/session/centre", put(choose_centre))
        .route("/session/edit", post(begin_edit))
        .route("/appointments", get(appointments_page))
        .route("/appointments/slot", post(choose_slot))
        .route("/appointments/date", post(enter_date))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Today in the reference time zone.
///
/// Computed once per request at the boundary; everything below the
/// handlers takes it as an explicit parameter.
fn today() -> CalendarDate {
    Utc::now().with_timezone(&REFERENCE_ZONE).date_naive().into()
}

/// Start a booking attempt for a test type.
async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    let test_type = TestType::parse(&req.test_type).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let session_id = Uuid::new_v4().to_string();
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), BookingAttempt::new(test_type));

    Ok(Json(StartSessionResponse { session_id }))
}

/// Record the chosen test centre (and any eligibility window) on the
/// attempt. While amending a location change this lands on the edit
/// record instead.
async fn choose_centre(
    State(state): State<AppState>,
    Json(req): Json<ChooseCentreRequest>,
) -> Result<(), AppError> {
    let centre = CentreId::parse(&req.centre).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let eligibility_from = parse_optional_date(req.eligibility_from.as_deref())?;
    let eligibility_to = parse_optional_date(req.eligibility_to.as_deref())?;

    let mut sessions = state.sessions.write().await;
    let attempt = sessions
        .get_mut(&req.session_id)
        .ok_or(AppError::SessionNotFound)?;

    attempt.choose_centre(centre);
    // Recording the centre also marks the eligibility stage as run; absent
    // bounds mean an unconstrained candidate, not a skipped stage
    attempt.eligibility = Some(EligibilityWindow::new(eligibility_from, eligibility_to));

    Ok(())
}

/// Render the date/slot selection page.
async fn appointments_page(
    State(state): State<AppState>,
    Query(req): Query<AppointmentsQuery>,
) -> Result<Json<DateSelectionResponse>, AppError> {
    let requested = parse_optional_date(req.date.as_deref())?;

    let mut sessions = state.sessions.write().await;
    let attempt = sessions
        .get_mut(&req.session_id)
        .ok_or(AppError::SessionNotFound)?;

    let view = state.flow.render(attempt, requested, today()).await?;
    Ok(Json(view.into()))
}

/// Record the candidate's chosen slot.
async fn choose_slot(
    State(state): State<AppState>,
    Json(req): Json<ChooseSlotRequest>,
) -> Result<Json<ChooseSlotResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let attempt = sessions
        .get_mut(&req.session_id)
        .ok_or(AppError::SessionNotFound)?;

    let next = state.flow.choose_slot(attempt, &req.slot_id, today())?;
    Ok(Json(ChooseSlotResponse {
        next: next.as_target(),
    }))
}

/// Validate a day/month/year form submission.
///
/// Field-scoped rejections come back as a single error code; the form
/// itself is re-rendered by the caller with the prior input preserved.
async fn enter_date(
    State(state): State<AppState>,
    Json(req): Json<EnterDateRequest>,
) -> Result<Json<EnterDateResponse>, AppError> {
    let sessions = state.sessions.read().await;
    if !sessions.contains_key(&req.session_id) {
        return Err(AppError::SessionNotFound);
    }
    drop(sessions);

    let fields = DateFields::new(req.day, req.month, req.year);
    match state.flow.enter_date(&fields, today()) {
        Ok(date) => Ok(Json(EnterDateResponse {
            date: date.to_string(),
        })),
        Err(rejection) => Err(AppError::DateRejected {
            code: rejection.code(state.flow.config().near_term),
        }),
    }
}

/// Enter re-scheduling mode for a confirmed booking.
async fn begin_edit(
    State(state): State<AppState>,
    Json(req): Json<BeginEditRequest>,
) -> Result<(), AppError> {
    let change = ChangeTarget::parse(&req.change).ok_or_else(|| AppError::BadRequest {
        message: format!("unknown change target: {}", req.change),
    })?;

    let mut sessions = state.sessions.write().await;
    let attempt = sessions
        .get_mut(&req.session_id)
        .ok_or(AppError::SessionNotFound)?;

    attempt.begin_edit(change).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Parse an optional strict ISO date query/body field.
fn parse_optional_date(raw: Option<&str>) -> Result<Option<CalendarDate>, AppError> {
    raw.map(|s| {
        CalendarDate::parse_iso(s).map_err(|e| AppError::BadRequest {
            message: format!("{}: {}", e, s),
        })
    })
    .transpose()
}
