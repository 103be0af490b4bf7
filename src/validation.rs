//! Gatekeeping rules applied to raw form input before anything touches the
//! store. The checks run in a fixed order and stop at the first failure so the
//! footer always shows a single, predictable message.

use chrono::{Days, NaiveDate};

use crate::error::ValidationError;
use crate::models::{Gender, NewReservation, RawReservation, DATE_FORMAT};

/// Turn raw field strings into a [`NewReservation`].
///
/// Order of checks: presence and control characters, date format, date order, numeric format, numeric
/// range, gender category. Surrounding whitespace is ignored everywhere.
pub fn validate(raw: &RawReservation) -> Result<NewReservation, ValidationError> {
    let fields = [
        ("Passenger Name", raw.passenger_name.trim()),
        ("Age", raw.age.trim()),
        ("Gender", raw.gender.trim()),
        ("Source", raw.source.trim()),
        ("Destination", raw.destination.trim()),
        ("Journey Date", raw.journey_date.trim()),
        ("Return Date", raw.return_date.trim()),
        ("Fare", raw.fare.trim()),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField(*name));
    }
    if let Some((name, _)) = fields
        .iter()
        .find(|(_, value)| value.chars().any(char::is_control))
    {
        return Err(ValidationError::ControlCharacter(*name));
    }

    let journey_date = parse_date("Journey Date", &raw.journey_date)?;
    let return_date = parse_date("Return Date", &raw.return_date)?;
    if return_date <= journey_date {
        return Err(ValidationError::DateOrder);
    }

    let age_raw = raw.age.trim();
    let age = age_raw
        .parse::<i64>()
        .map_err(|_| ValidationError::NumericFormat {
            field: "Age",
            value: age_raw.to_string(),
        })?;
    let fare_raw = raw.fare.trim();
    let fare = fare_raw
        .parse::<f64>()
        .ok()
        .filter(|fare| fare.is_finite())
        .ok_or_else(|| ValidationError::NumericFormat {
            field: "Fare",
            value: fare_raw.to_string(),
        })?;

    if age < 0 || fare < 0.0 {
        return Err(ValidationError::Range);
    }

    let gender = raw
        .gender
        .parse::<Gender>()
        .map_err(|err| ValidationError::UnknownGender(err.0))?;

    Ok(NewReservation {
        passenger_name: raw.passenger_name.trim().to_string(),
        age,
        gender,
        source: raw.source.trim().to_string(),
        destination: raw.destination.trim().to_string(),
        journey_date,
        return_date,
        fare,
    })
}

/// Parse a `YYYY-MM-DD` date, attributing failures to `field`.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::DateFormat {
        field,
        value: trimmed.to_string(),
    })
}

/// Earliest return date the booking form should offer for the given journey
/// date. Advisory only: [`validate`] re-checks the ordering regardless.
pub fn earliest_return_date(journey_date: &str) -> Option<NaiveDate> {
    let journey = NaiveDate::parse_from_str(journey_date.trim(), DATE_FORMAT).ok()?;
    journey.checked_add_days(Days::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawReservation {
        RawReservation {
            passenger_name: "Asha Rao".into(),
            age: "34".into(),
            gender: "Female".into(),
            source: "Delhi".into(),
            destination: "Mysore".into(),
            journey_date: "2025-06-01".into(),
            return_date: "2025-06-05".into(),
            fare: "500".into(),
        }
    }

    #[test]
    fn accepts_a_complete_booking() {
        let booking = validate(&raw()).unwrap();
        assert_eq!(booking.passenger_name, "Asha Rao");
        assert_eq!(booking.age, 34);
        assert_eq!(booking.gender, Gender::Female);
        assert_eq!(booking.journey_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(booking.fare, 500.0);
    }

    #[test]
    fn reports_first_missing_field() {
        let mut input = raw();
        input.gender = "  ".into();
        input.fare.clear();
        assert_eq!(validate(&input), Err(ValidationError::MissingField("Gender")));
    }

    #[test]
    fn rejects_line_breaks_in_text_fields() {
        let mut input = raw();
        input.passenger_name = "Ravi\nKumar".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::ControlCharacter("Passenger Name"))
        );

        let mut input = raw();
        input.destination = "Mys\rore".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::ControlCharacter("Destination"))
        );

        let mut input = raw();
        input.source = "Del\u{7}hi".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::ControlCharacter("Source"))
        );
    }

    #[test]
    fn missing_fields_win_over_control_characters() {
        let mut input = raw();
        input.passenger_name = "A\tB".into();
        input.fare.clear();
        assert_eq!(validate(&input), Err(ValidationError::MissingField("Fare")));
    }

    #[test]
    fn rejects_malformed_dates() {
        let mut input = raw();
        input.journey_date = "01/06/2025".into();
        assert!(matches!(
            validate(&input),
            Err(ValidationError::DateFormat { field: "Journey Date", .. })
        ));
    }

    #[test]
    fn rejects_equal_and_reversed_dates() {
        let mut input = raw();
        input.return_date = input.journey_date.clone();
        assert_eq!(validate(&input), Err(ValidationError::DateOrder));

        input.return_date = "2025-05-31".into();
        assert_eq!(validate(&input), Err(ValidationError::DateOrder));
    }

    #[test]
    fn date_order_is_checked_before_numbers() {
        let mut input = raw();
        input.return_date = "2025-05-01".into();
        input.age = "abc".into();
        assert_eq!(validate(&input), Err(ValidationError::DateOrder));
    }

    #[test]
    fn rejects_non_numeric_age_and_fare() {
        let mut input = raw();
        input.age = "thirty".into();
        assert!(matches!(
            validate(&input),
            Err(ValidationError::NumericFormat { field: "Age", .. })
        ));

        let mut input = raw();
        input.fare = "NaN".into();
        assert!(matches!(
            validate(&input),
            Err(ValidationError::NumericFormat { field: "Fare", .. })
        ));
    }

    #[test]
    fn rejects_negative_values() {
        let mut input = raw();
        input.age = "-1".into();
        assert_eq!(validate(&input), Err(ValidationError::Range));

        let mut input = raw();
        input.fare = "-0.5".into();
        assert_eq!(validate(&input), Err(ValidationError::Range));
    }

    #[test]
    fn rejects_unknown_gender() {
        let mut input = raw();
        input.gender = "Robot".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::UnknownGender("Robot".into()))
        );
    }

    #[test]
    fn earliest_return_is_the_next_day() {
        assert_eq!(
            earliest_return_date("2025-12-31"),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
        assert_eq!(earliest_return_date("not a date"), None);
    }
}
