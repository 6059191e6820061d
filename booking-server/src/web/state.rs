//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{CalendarDate, CentreId, TestType};
use crate::flow::{SelectionFlow, SlotSource};
use crate::policy::BookingConfig;
use crate::scheduling::{MockSchedulingClient, SchedulingClient, SchedulingError, SlotsResult};
use crate::session::BookingAttempt;

/// The slot provider the server was started with.
///
/// Either the real scheduling API or the JSON-directory mock; both sit
/// behind the same [`SlotSource`] seam so the flow never knows which.
#[derive(Clone)]
pub enum SlotBackend {
    Api(SchedulingClient),
    Mock(MockSchedulingClient),
}

impl SlotSource for SlotBackend {
    async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError> {
        match self {
            SlotBackend::Api(client) => {
                client
                    .get_slots(centre, test_type, date_from, date_to, preferred_date)
                    .await
            }
            SlotBackend::Mock(client) => {
                client
                    .get_slots(centre, test_type, date_from, date_to, preferred_date)
                    .await
            }
        }
    }
}

/// Shared application state.
///
/// The session map is an in-memory stand-in for the session store the
/// surrounding deployment owns; it exists so the service runs end to end
/// on its own.
#[derive(Clone)]
pub struct AppState {
    /// The appointment selection flow over the configured backend.
    pub flow: Arc<SelectionFlow<SlotBackend>>,

    /// Booking attempts keyed by session id.
    pub sessions: Arc<RwLock<HashMap<String, BookingAttempt>>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: SlotBackend, config: BookingConfig) -> Self {
        Self {
            flow: Arc::new(SelectionFlow::new(backend, config)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
