//! Command interface between the presentation layer and the core. Each user
//! action becomes one [`Command`]; the answer is a plain [`Outcome`] or a typed
//! [`DeskError`] the caller can react to case by case.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::analytics::AnalyticsReport;
use crate::config::Config;
use crate::db::ReservationStore;
use crate::document::TicketPrinter;
use crate::error::{DeskError, StoreError};
use crate::export::{export_csv, ExportOutcome, HISTORY_FILE_NAME, SELECTION_FILE_NAME};
use crate::models::{RawReservation, Reservation};
use crate::validation::validate;

#[derive(Debug, Clone)]
pub enum Command {
    /// Validate and persist a new booking.
    Book(RawReservation),
    /// Look up by ticket id when the query is an integer, by passenger name
    /// substring otherwise.
    Search(String),
    Cancel(i64),
    /// Write `Ticket_<id>.pdf` into the output directory.
    Print(i64),
    ExportAll,
    /// Export the given records in the order given.
    ExportSelected(Vec<Reservation>),
    Analytics,
    History,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Booked(Reservation),
    Found(Vec<Reservation>),
    Cancelled(i64),
    Printed(PathBuf),
    Exported(ExportOutcome),
    Report(AnalyticsReport),
    History(Vec<Reservation>),
}

/// Owns the reservation store and the output locations. All work happens
/// synchronously on the caller's thread.
pub struct Desk {
    store: ReservationStore,
    printer: TicketPrinter,
    output_dir: PathBuf,
}

impl Desk {
    pub fn new(store: ReservationStore, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            store,
            printer: TicketPrinter::new(output_dir.clone()),
            output_dir,
        }
    }

    /// Open the configured database and wire the output directory.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let store = ReservationStore::open(&config.database_path())?;
        Ok(Self::new(store, config.output_dir.clone()))
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    pub fn execute(&self, command: Command) -> Result<Outcome, DeskError> {
        match command {
            Command::Book(raw) => self.book(&raw).map(Outcome::Booked),
            Command::Search(query) => self.search(&query).map(Outcome::Found),
            Command::Cancel(id) => self.cancel(id).map(Outcome::Cancelled),
            Command::Print(id) => self.print(id).map(Outcome::Printed),
            Command::ExportAll => self.export_all().map(Outcome::Exported),
            Command::ExportSelected(records) => {
                self.export_selected(&records).map(Outcome::Exported)
            }
            Command::Analytics => self.analytics().map(Outcome::Report),
            Command::History => Ok(Outcome::History(self.store.fetch_all()?)),
        }
    }

    pub fn book(&self, raw: &RawReservation) -> Result<Reservation, DeskError> {
        let booking = validate(raw).inspect_err(|err| warn!(error = %err, "booking rejected"))?;
        let reservation = self.store.create(&booking)?;
        info!(
            id = reservation.id,
            route = %reservation.route(),
            "ticket booked"
        );
        Ok(reservation)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Reservation>, DeskError> {
        let query = query.trim();
        let results = match query.parse::<i64>() {
            Ok(id) => self.store.fetch_by_id(id)?.into_iter().collect(),
            Err(_) => self.store.fetch_by_name_substring(query)?,
        };

        if results.is_empty() {
            Err(DeskError::NotFound("No matching tickets found.".to_string()))
        } else {
            Ok(results)
        }
    }

    pub fn fetch(&self, id: i64) -> Result<Reservation, DeskError> {
        self.store
            .fetch_by_id(id)?
            .ok_or_else(|| DeskError::ticket_not_found(id))
    }

    pub fn cancel(&self, id: i64) -> Result<i64, DeskError> {
        if self.store.delete_by_id(id)? {
            info!(id, "ticket cancelled");
            Ok(id)
        } else {
            Err(DeskError::ticket_not_found(id))
        }
    }

    pub fn print(&self, id: i64) -> Result<PathBuf, DeskError> {
        let reservation = self.fetch(id)?;
        Ok(self.printer.print(&reservation)?)
    }

    pub fn export_all(&self) -> Result<ExportOutcome, DeskError> {
        let snapshot = self.store.fetch_all()?;
        Ok(export_csv(&snapshot, &self.output_dir.join(HISTORY_FILE_NAME))?)
    }

    pub fn export_selected(&self, records: &[Reservation]) -> Result<ExportOutcome, DeskError> {
        Ok(export_csv(records, &self.output_dir.join(SELECTION_FILE_NAME))?)
    }

    pub fn analytics(&self) -> Result<AnalyticsReport, DeskError> {
        let snapshot = self.store.fetch_all()?;
        Ok(AnalyticsReport::from_snapshot(&snapshot))
    }

    /// Release the database connection.
    pub fn close(self) -> Result<(), DeskError> {
        Ok(self.store.close()?)
    }
}
