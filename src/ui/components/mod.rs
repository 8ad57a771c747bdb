//! Reusable widgets for the booking form.

mod input;
mod popup;

pub use input::{FieldInput, FieldMode};
pub(crate) use popup::render_suggestions;
