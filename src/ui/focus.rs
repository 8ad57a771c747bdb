use crate::booking::TripType;

/// Focusable element of the booking form, in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TripType,
    Origin,
    Destination,
    DepartureDate,
    ReturnDate,
    Passengers,
    Cabin,
    Submit,
}

impl FormField {
    pub(crate) const ORDER: [Self; 8] = [
        Self::TripType,
        Self::Origin,
        Self::Destination,
        Self::DepartureDate,
        Self::ReturnDate,
        Self::Passengers,
        Self::Cabin,
        Self::Submit,
    ];

    /// Caption drawn next to the element.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TripType => "Trip Type",
            Self::Origin => "From",
            Self::Destination => "To",
            Self::DepartureDate => "Departure Date",
            Self::ReturnDate => "Return Date",
            Self::Passengers => "Passengers",
            Self::Cabin => "Class",
            Self::Submit => "Search Flights",
        }
    }

    /// The next focusable field. The return date is disabled under one-way
    /// trips and is skipped.
    #[must_use]
    pub fn next(self, trip_type: TripType) -> Self {
        self.step(trip_type, 1)
    }

    /// The previous focusable field, with the same one-way skip.
    #[must_use]
    pub fn prev(self, trip_type: TripType) -> Self {
        self.step(trip_type, Self::ORDER.len() - 1)
    }

    fn step(self, trip_type: TripType, delta: usize) -> Self {
        let len = Self::ORDER.len();
        let mut index = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        loop {
            index = (index + delta) % len;
            let candidate = Self::ORDER[index];
            if candidate == Self::ReturnDate && trip_type == TripType::OneWay {
                continue;
            }
            return candidate;
        }
    }
}
