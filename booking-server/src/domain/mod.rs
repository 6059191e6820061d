//! Domain types for the booking engine.
//!
//! This module contains the core domain model types that represent
//! validated booking data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity; in particular, no invalid `CalendarDate` can exist.

mod centre;
mod date;
mod eligibility;
mod fields;
mod slot;
mod test_type;

pub use centre::{CentreId, InvalidCentreId};
pub use date::{CalendarDate, InvalidDate, REFERENCE_ZONE};
pub use eligibility::EligibilityWindow;
pub use fields::{DateFields, DateRejection, NearTermPolicy, parse_date_fields};
pub use slot::{AppointmentSlot, SlotsByDate};
pub use test_type::{InvalidTestType, TestType};
