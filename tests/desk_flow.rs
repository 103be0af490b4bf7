use std::fs;

use tempfile::tempdir;

use ticket_desk::export::{ExportOutcome, HISTORY_FILE_NAME, SELECTION_FILE_NAME};
use ticket_desk::{
    Command, Desk, DeskError, Gender, Outcome, RawReservation, ReservationStore, ValidationError,
};

fn raw(name: &str, age: &str, gender: &str, source: &str, destination: &str) -> RawReservation {
    RawReservation {
        passenger_name: name.into(),
        age: age.into(),
        gender: gender.into(),
        source: source.into(),
        destination: destination.into(),
        journey_date: "2025-01-10".into(),
        return_date: "2025-01-15".into(),
        fare: "500".into(),
    }
}

fn desk_in(dir: &std::path::Path) -> Desk {
    let store = ReservationStore::open(&dir.join("book_ticket.db")).unwrap();
    Desk::new(store, dir.join("out"))
}

#[test]
fn bookings_survive_reopening_the_database() {
    let dir = tempdir().unwrap();
    let booked = {
        let desk = desk_in(dir.path());
        let booked = desk.book(&raw("Asha", "30", "Female", "Delhi", "Mysore")).unwrap();
        desk.close().unwrap();
        booked
    };

    let desk = desk_in(dir.path());
    let fetched = desk.fetch(booked.id).unwrap();
    assert_eq!(fetched, booked);
    assert_eq!(fetched.gender, Gender::Female);
    assert_eq!(fetched.fare_display(), "500.00");
}

#[test]
fn return_date_must_follow_journey_date() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());

    let mut same_day = raw("Ravi", "40", "Male", "Delhi", "Hassan");
    same_day.return_date = same_day.journey_date.clone();
    let err = desk.book(&same_day).unwrap_err();
    assert!(matches!(
        err,
        DeskError::Validation(ValidationError::DateOrder)
    ));
    assert_eq!(desk.store().count().unwrap(), 0);
}

#[test]
fn line_breaks_in_names_are_refused_before_storage() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());

    let err = desk
        .book(&raw("Ravi\nKumar", "40", "Male", "Delhi", "Hassan"))
        .unwrap_err();
    assert!(matches!(
        err,
        DeskError::Validation(ValidationError::ControlCharacter("Passenger Name"))
    ));
    assert_eq!(desk.store().count().unwrap(), 0);
    assert_eq!(desk.export_all().unwrap(), ExportOutcome::NothingToExport);
}

#[test]
fn cancelling_twice_reports_not_found() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());
    let booked = desk.book(&raw("Ravi", "40", "Male", "Delhi", "Hassan")).unwrap();

    assert_eq!(desk.cancel(booked.id).unwrap(), booked.id);
    let err = desk.cancel(booked.id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), format!("Ticket ID {} not found!", booked.id));
    assert_eq!(desk.store().count().unwrap(), 0);
}

#[test]
fn search_matches_ids_and_name_fragments() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());
    let asha = desk.book(&raw("Asha Rao", "30", "Female", "Delhi", "Mysore")).unwrap();
    desk.book(&raw("Ravi", "40", "Male", "Delhi", "Hassan")).unwrap();

    let by_id = desk.search(&asha.id.to_string()).unwrap();
    assert_eq!(by_id, vec![asha.clone()]);

    let by_name = desk.search("rao").unwrap();
    assert_eq!(by_name, vec![asha]);

    assert!(desk.search("nobody").unwrap_err().is_not_found());
}

#[test]
fn export_writes_header_plus_one_line_per_ticket() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());
    desk.book(&raw("Asha", "30", "Female", "Delhi", "Mysore")).unwrap();
    desk.book(&raw("Ravi, Jr.", "40", "Male", "Delhi", "Hassan")).unwrap();

    let outcome = desk.export_all().unwrap();
    let path = dir.path().join("out").join(HISTORY_FILE_NAME);
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            rows: 2
        }
    );

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "ID,Passenger Name,Age,Gender,Source,Destination,Journey Date,Return Date,Fare"
    );
    assert!(lines[2].contains("\"Ravi, Jr.\""));
}

#[test]
fn exported_selection_keeps_the_given_order() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());
    let booked: Vec<_> = ["One", "Two", "Three", "Four"]
        .iter()
        .map(|name| desk.book(&raw(name, "30", "Other", "Delhi", "Udupi")).unwrap())
        .collect();
    let selection = vec![booked[2].clone(), booked[0].clone()];

    let Outcome::Exported(outcome) = desk
        .execute(Command::ExportSelected(selection))
        .unwrap()
    else {
        panic!("expected an export outcome");
    };
    let path = dir.path().join("out").join(SELECTION_FILE_NAME);
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            rows: 2
        }
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let ids: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[0].to_string())
        .collect();
    assert_eq!(
        ids,
        vec![booked[2].id.to_string(), booked[0].id.to_string()]
    );

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().nth(1).unwrap().contains("Three"));
    assert!(!contents.contains("Two"));
}

#[test]
fn exporting_nothing_writes_no_file() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());

    assert_eq!(desk.export_all().unwrap(), ExportOutcome::NothingToExport);
    assert_eq!(
        desk.export_selected(&[]).unwrap(),
        ExportOutcome::NothingToExport
    );
    assert!(!dir.path().join("out").join(HISTORY_FILE_NAME).exists());
    assert!(!dir.path().join("out").join(SELECTION_FILE_NAME).exists());
}

#[test]
fn analytics_through_commands() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());

    let mut first = raw("A", "25", "Female", "Delhi", "Mysore");
    first.fare = "1000".into();
    let mut second = raw("B", "40", "Male", "Delhi", "Mysore");
    second.fare = "1500".into();
    for booking in [first, second] {
        desk.execute(Command::Book(booking)).unwrap();
    }

    let Outcome::Report(report) = desk.execute(Command::Analytics).unwrap() else {
        panic!("expected an analytics report");
    };
    assert_eq!(report.routes.len(), 1);
    assert_eq!(report.routes[0].passengers, 2);
    assert_eq!(report.routes[0].total_fare, 2500.0);
    assert_eq!(report.top_routes, report.routes);
    assert_eq!(report.total_passengers, 2);
}

#[test]
fn history_command_lists_in_booking_order() {
    let dir = tempdir().unwrap();
    let desk = desk_in(dir.path());
    let first = desk.book(&raw("A", "25", "Female", "Delhi", "Mysore")).unwrap();
    let second = desk.book(&raw("B", "40", "Male", "Delhi", "Hassan")).unwrap();

    let Outcome::History(records) = desk.execute(Command::History).unwrap() else {
        panic!("expected history");
    };
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}
