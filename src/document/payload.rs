//! Text encoded into the ticket's QR code.
//!
//! One `Label: value` pair per line, always in this order:
//!
//! ```text
//! Ticket ID: <id>
//! Name: <passenger name>
//! From: <source>
//! To: <destination>
//! Journey: <YYYY-MM-DD>
//! Return: <YYYY-MM-DD>
//! Fare: <fare, two decimals> INR
//! ```
//!
//! Source and destination get their own lines rather than one combined
//! `Route: A -> B` line, so a place name containing an arrow still decodes.

use crate::models::{format_date, Reservation, FARE_UNIT};

const LABELS: [&str; 7] = ["Ticket ID", "Name", "From", "To", "Journey", "Return", "Fare"];

/// Values recovered from a scanned payload, kept as text exactly as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    pub ticket_id: String,
    pub passenger_name: String,
    pub source: String,
    pub destination: String,
    pub journey_date: String,
    pub return_date: String,
    pub fare: String,
}

pub fn encode_payload(reservation: &Reservation) -> String {
    let values = [
        reservation.id.to_string(),
        single_line(&reservation.passenger_name),
        single_line(&reservation.source),
        single_line(&reservation.destination),
        format_date(reservation.journey_date),
        format_date(reservation.return_date),
        format!("{} {FARE_UNIT}", reservation.fare_display()),
    ];

    LABELS
        .iter()
        .zip(values.iter())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inverse of [`encode_payload`]. Returns `None` when a line is missing, out
/// of order, or carries the wrong label.
pub fn parse_payload(text: &str) -> Option<TicketPayload> {
    let mut lines = text.lines();
    let mut values = Vec::with_capacity(LABELS.len());
    for label in LABELS {
        let line = lines.next()?;
        let value = line.strip_prefix(label)?.strip_prefix(": ")?;
        values.push(value.to_string());
    }
    if lines.next().is_some() {
        return None;
    }

    let mut values = values.into_iter();
    Some(TicketPayload {
        ticket_id: values.next()?,
        passenger_name: values.next()?,
        source: values.next()?,
        destination: values.next()?,
        journey_date: values.next()?,
        return_date: values.next()?,
        fare: values.next()?,
    })
}

/// Bookings are validated free of line breaks; records written to the store
/// directly still must not shift the following lines.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
