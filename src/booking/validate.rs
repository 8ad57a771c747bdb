use super::{BookingQuery, TripType};

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Origin,
    Destination,
    DepartureDate,
    ReturnDate,
}

/// Per-field validation messages in form order; empty iff the query is
/// submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(Field, &'static str)>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &'static str) {
        self.entries.push((field, message));
    }

    /// Message for a specific field, if that field failed validation.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| *message)
    }

    /// True when every required field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields that failed validation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fields that failed validation, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }
}

impl BookingQuery {
    /// Check that every required field is present.
    ///
    /// Pure function of the draft: no network, no clock. The return date is
    /// only required for round trips and is never flagged under one-way,
    /// whatever it contains.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if self.origin.is_none() {
            errors.push(Field::Origin, "Please enter a departure city");
        }
        if self.destination.is_none() {
            errors.push(Field::Destination, "Please enter a destination city");
        }
        if self.departure_date.is_empty() {
            errors.push(Field::DepartureDate, "Please select a departure date");
        }
        if self.trip_type == TripType::RoundTrip && self.return_date.is_empty() {
            errors.push(Field::ReturnDate, "Please select a return date");
        }
        errors
    }
}
