//! Booking query domain: the form draft, tagged field updates, validation,
//! and the immutable snapshot captured when a search is submitted.
//!
//! Everything in this module is pure state manipulation; network and timing
//! concerns live in [`crate::suggest`] and [`crate::ui`].

mod query;
mod snapshot;
mod validate;

pub use query::{
    Airport, BookingQuery, CabinClass, FieldUpdate, MAX_PASSENGERS, MIN_PASSENGERS, TripType,
    passenger_label,
};
pub use snapshot::{SearchOutcome, Snapshot};
pub use validate::{Field, ValidationErrors};
