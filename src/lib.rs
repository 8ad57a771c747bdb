//! Core crate exports for building and running the `skyjourney` booking form.
//!
//! The root module primarily re-exports the domain and UI types so that
//! embedders can configure and run the form without digging through the
//! module hierarchy.

pub mod app_dirs;
pub mod booking;
pub mod logging;
pub mod suggest;
pub mod theme;
pub mod ui;

pub use booking::{Airport, BookingQuery, SearchOutcome, Snapshot};
pub use suggest::{HttpSuggestSource, SuggestSource};
pub use theme::Theme;
pub use ui::{FormOptions, run};
