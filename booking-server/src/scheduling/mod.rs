//! Scheduling provider client.
//!
//! The upstream scheduling provider owns appointment inventory; this
//! module is the HTTP client for it, plus a JSON-file mock for running
//! without credentials.
//!
//! Key characteristics of the provider:
//! - Slot start times are UTC instants; grouping into calendar days
//!   happens client-side in the reference time zone
//! - One fetch covers a date range, so a week of navigation is served by
//!   a single call
//! - `kpiIdentifiers` ride along only when the request carries the
//!   `preferredDate` first-exposure signal

mod client;
mod error;
mod mock;
mod types;

pub use client::{SchedulingClient, SchedulingConfig};
pub use error::SchedulingError;
pub use mock::MockSchedulingClient;
pub use types::{ConversionError, SlotsResponse, SlotsResult, WireSlot, convert_response};
