//! Appointment selection orchestration.
//!
//! This module answers the two questions the selection page asks: what
//! does the candidate see for a given date, and what happens when they
//! pick a slot. It owns no I/O of its own beyond the [`SlotSource`] seam.

mod engine;
mod error;
mod view;

pub use engine::{SelectionFlow, SlotSource};
pub use error::FlowError;
pub use view::{DateSelectionView, NextStep, SlotView};
