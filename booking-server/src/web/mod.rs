//! Web layer for the booking engine.
//!
//! Thin JSON glue over the selection flow. HTML rendering, i18n and real
//! session persistence belong to the surrounding deployment; this layer
//! exists so the engine runs end to end as a service.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, SlotBackend};
