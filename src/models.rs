//! Domain models that mirror the `tickets` table and get passed throughout the
//! desk and the TUI. These types stay light-weight data holders so the other
//! layers can focus on validation, persistence and presentation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Textual format used for every date the desk reads, stores or prints.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Currency suffix appended to fares on tickets and barcode payloads.
pub const FARE_UNIT: &str = "INR";

/// Locations offered by the booking form. Free text is still accepted; this
/// list only feeds the source/destination autocomplete.
pub const KNOWN_LOCATIONS: &[&str] = &[
    "Delhi",
    "Hyderabad",
    "Mysore",
    "Bagalkote",
    "Ballari",
    "Belagavi",
    "Bengaluru",
    "Bidar",
    "Chamarajanagar",
    "Chikkaballapur",
    "Chikkamagaluru",
    "Chitradurga",
    "Dakshina Kannada",
    "Davanagere",
    "Dharwad",
    "Gadag",
    "Hassan",
    "Haveri",
    "Kalaburagi",
    "Kodagu",
    "Kolar",
    "Koppal",
    "Mandya",
    "Mysuru",
    "Raichur",
    "Ramanagara",
    "Shivamogga",
    "Tumakuru",
    "Udupi",
    "Uttara Kannada",
    "Vijayanagara",
    "Vijayapura",
    "Yadgir",
];

/// Passenger gender categories accepted at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Every category in the order the booking form cycles through them.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a gender string is not one of [`Gender::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    /// Case-insensitive so "female" typed by hand matches the stored "Female".
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGender(trimmed.to_string()))
    }
}

/// The ordered `(source, destination)` pair a passenger travels on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub source: String,
    pub destination: String,
}

impl Route {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Raw, unvalidated field values exactly as the presentation layer captured
/// them. Nothing here has been trimmed or parsed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReservation {
    pub passenger_name: String,
    pub age: String,
    pub gender: String,
    pub source: String,
    pub destination: String,
    pub journey_date: String,
    pub return_date: String,
    pub fare: String,
}

/// A validated booking that has not been assigned an id yet. Only
/// [`crate::validation::validate`] produces these outside of tests.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub passenger_name: String,
    pub age: i64,
    pub gender: Gender,
    pub source: String,
    pub destination: String,
    pub journey_date: NaiveDate,
    pub return_date: NaiveDate,
    pub fare: f64,
}

/// One passenger's booked journey as persisted in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Store-assigned primary key. Never supplied by callers.
    pub id: i64,
    pub passenger_name: String,
    pub age: i64,
    pub gender: Gender,
    pub source: String,
    pub destination: String,
    pub journey_date: NaiveDate,
    pub return_date: NaiveDate,
    pub fare: f64,
}

impl Reservation {
    /// Attach the id handed out by the store to a validated booking.
    pub fn from_new(id: i64, new: NewReservation) -> Self {
        Self {
            id,
            passenger_name: new.passenger_name,
            age: new.age,
            gender: new.gender,
            source: new.source,
            destination: new.destination,
            journey_date: new.journey_date,
            return_date: new.return_date,
            fare: new.fare,
        }
    }

    pub fn route(&self) -> Route {
        Route::new(self.source.clone(), self.destination.clone())
    }

    /// Fare with two decimals, no unit. Shared by CSV rows, ticket lines and
    /// the barcode payload so all three agree byte for byte.
    pub fn fare_display(&self) -> String {
        format_fare(self.fare)
    }
}

pub fn format_fare(fare: f64) -> String {
    format!("{fare:.2}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
