use serde::Deserialize;

/// Smallest bookable party size.
pub const MIN_PASSENGERS: u8 = 1;
/// Largest bookable party size.
pub const MAX_PASSENGERS: u8 = 6;

/// Whether the journey returns to its origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TripType {
    #[default]
    RoundTrip,
    OneWay,
}

impl TripType {
    /// Wire/output identifier for this trip type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundTrip => "roundTrip",
            Self::OneWay => "oneWay",
        }
    }

    /// Human readable label shown next to the radio control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RoundTrip => "Round Trip",
            Self::OneWay => "One Way",
        }
    }

    /// The other trip type, used by the toggle control.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::RoundTrip => Self::OneWay,
            Self::OneWay => Self::RoundTrip,
        }
    }
}

/// Service class for every passenger on the itinerary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CabinClass {
    #[default]
    Economy,
    Premium,
    Business,
    First,
}

impl CabinClass {
    /// All classes in display order, used by the cycling selector.
    pub const ALL: [Self; 4] = [Self::Economy, Self::Premium, Self::Business, Self::First];

    /// Wire/output identifier for this cabin class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Business => "business",
            Self::First => "first",
        }
    }

    /// Human readable label shown by the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First Class",
        }
    }

    /// The next class in display order, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|class| *class == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// The previous class in display order, wrapping at the start.
    #[must_use]
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|class| *class == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Location record returned by the suggestion endpoint.
///
/// The record is treated as opaque: fields are carried through for display
/// and never parsed further. Absent fields decode as empty strings and any
/// extra fields in the payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Airport {
    #[serde(default)]
    pub municipality: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iata_code: String,
}

impl Airport {
    /// Display label in the `Municipality - Name (IATA)` shape used by the
    /// autocomplete fields and the summary panel.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {} ({})", self.municipality, self.name, self.iata_code)
    }

    /// Short code for compact route displays, falling back to the
    /// municipality when the record carries no IATA code.
    #[must_use]
    pub fn code(&self) -> &str {
        if self.iata_code.is_empty() {
            &self.municipality
        } else {
            &self.iata_code
        }
    }
}

/// Label for the passenger-count selector (`1 Passenger`, `3 Passengers`).
#[must_use]
pub fn passenger_label(count: u8) -> String {
    if count == 1 {
        "1 Passenger".to_string()
    } else {
        format!("{count} Passengers")
    }
}

/// Tagged mutation applied to the booking draft.
///
/// Routing every edit through [`BookingQuery::apply`] keeps the single
/// cross-field rule (switching to one-way clears the return date) in one
/// place instead of scattered across input handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    TripType(TripType),
    Origin(Option<Airport>),
    Destination(Option<Airport>),
    DepartureDate(String),
    ReturnDate(String),
    Passengers(u8),
    Cabin(CabinClass),
}

/// The booking query draft backing the form.
///
/// Created with defaults at startup and mutated only via [`Self::apply`];
/// a successful search copies it into a [`super::Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuery {
    pub trip_type: TripType,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    /// Departure date as entered, `YYYY-MM-DD` or empty.
    pub departure_date: String,
    /// Return date as entered; meaningless while `trip_type` is one-way.
    pub return_date: String,
    pub passengers: u8,
    pub cabin: CabinClass,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            trip_type: TripType::default(),
            origin: None,
            destination: None,
            departure_date: String::new(),
            return_date: String::new(),
            passengers: MIN_PASSENGERS,
            cabin: CabinClass::default(),
        }
    }
}

impl BookingQuery {
    /// Apply a tagged field update to the draft.
    ///
    /// Switching to one-way clears the return date; no other update has
    /// cross-field effects. Passenger counts are clamped to the bookable
    /// range.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::TripType(trip_type) => {
                if trip_type == TripType::OneWay {
                    self.return_date.clear();
                }
                self.trip_type = trip_type;
            }
            FieldUpdate::Origin(airport) => self.origin = airport,
            FieldUpdate::Destination(airport) => self.destination = airport,
            FieldUpdate::DepartureDate(date) => self.departure_date = date,
            FieldUpdate::ReturnDate(date) => self.return_date = date,
            FieldUpdate::Passengers(count) => {
                self.passengers = count.clamp(MIN_PASSENGERS, MAX_PASSENGERS);
            }
            FieldUpdate::Cabin(cabin) => self.cabin = cabin,
        }
    }
}
