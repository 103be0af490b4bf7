use std::fs;

use tempfile::tempdir;

use ticket_desk::document::ticket_file_name;
use ticket_desk::{Desk, DeskError, DocumentError, RawReservation, ReservationStore};

fn booking() -> RawReservation {
    RawReservation {
        passenger_name: "Meera".into(),
        age: "52".into(),
        gender: "Other".into(),
        source: "Bengaluru".into(),
        destination: "Udupi".into(),
        journey_date: "2025-03-01".into(),
        return_date: "2025-03-04".into(),
        fare: "899.5".into(),
    }
}

#[test]
fn printing_writes_a_pdf_and_cleans_up_the_barcode() {
    let dir = tempdir().unwrap();
    let desk = Desk::new(ReservationStore::open_in_memory().unwrap(), dir.path());
    let reservation = desk.book(&booking()).unwrap();

    let path = desk.print(reservation.id).unwrap();
    assert_eq!(path, dir.path().join(ticket_file_name(reservation.id)));

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .collect();
    assert!(leftovers.is_empty());
}

fn png_count(dir: &std::path::Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .count()
}

#[test]
fn barcode_is_removed_when_the_pdf_cannot_be_written() {
    let dir = tempdir().unwrap();
    let desk = Desk::new(ReservationStore::open_in_memory().unwrap(), dir.path());
    let reservation = desk.book(&booking()).unwrap();
    fs::create_dir(dir.path().join(ticket_file_name(reservation.id))).unwrap();

    let err = desk.print(reservation.id).unwrap_err();
    assert!(matches!(
        err,
        DeskError::Document(DocumentError::Io { .. })
    ));
    assert_eq!(png_count(dir.path()), 0);
}

#[test]
fn printing_an_unknown_ticket_is_not_found() {
    let dir = tempdir().unwrap();
    let desk = Desk::new(ReservationStore::open_in_memory().unwrap(), dir.path());

    let err = desk.print(42).unwrap_err();
    assert!(err.is_not_found());
    assert!(!dir.path().join(ticket_file_name(42)).exists());
}
