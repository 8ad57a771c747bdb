//! Suggestion fetching for the origin and destination autocomplete fields.
//!
//! A single background worker services both sides of the form over an mpsc
//! channel pair. Each side carries its own monotonically increasing request
//! id; replies that lose the race against a newer request are dropped, so
//! fast typing can never overwrite fresh candidates with stale ones.

mod client;
mod worker;

pub use client::{HttpSuggestSource, SuggestError, SuggestSource};
pub use worker::{FetchCommand, FetchReply, LatestIds, spawn};

/// The two independent autocomplete sides of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Origin,
    Destination,
}

impl Side {
    /// Identifier used in worker log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }
}
