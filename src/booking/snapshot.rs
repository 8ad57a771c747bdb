use super::BookingQuery;

/// Immutable copy of the booking query captured when a search completes.
///
/// The snapshot backs the summary panel and the end-of-run output; it is
/// never edited, so later form changes cannot retroactively alter what the
/// user searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    query: BookingQuery,
}

impl Snapshot {
    /// Capture the query as submitted.
    #[must_use]
    pub fn new(query: BookingQuery) -> Self {
        Self { query }
    }

    /// The submitted query.
    #[must_use]
    pub fn query(&self) -> &BookingQuery {
        &self.query
    }

    /// Compact route label for headers, e.g. `JFK -> LHR`.
    ///
    /// Sides without a selected airport render as `?`; that can only happen
    /// for hand-built snapshots since submission requires both sides.
    #[must_use]
    pub fn route(&self) -> String {
        let origin = self.query.origin.as_ref().map_or("?", |airport| airport.code());
        let destination = self
            .query
            .destination
            .as_ref()
            .map_or("?", |airport| airport.code());
        format!("{origin} -> {destination}")
    }
}

/// What the session produced, reported on stdout after the terminal UI
/// closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The last successfully submitted search, if any.
    pub submitted: Option<Snapshot>,
}
