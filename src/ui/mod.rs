//! Interactive terminal form for building and submitting a flight search.
//!
//! [`App`] owns the booking draft, the focus cycle, the per-side suggestion
//! state, and the submit phase machine; [`run`] drives it over a crossterm
//! event loop until the user quits.

mod actions;
mod app;
pub mod components;
mod focus;
mod render;
mod search_task;

#[cfg(test)]
mod tests;

pub use app::{App, FormOptions, run};
pub use focus::FormField;
