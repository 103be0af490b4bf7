use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::connection::{open_database, open_in_memory};
use crate::error::StoreError;
use crate::models::{Gender, NewReservation, Reservation};

const SELECT_COLUMNS: &str = "SELECT id, passenger_name, age, gender, source, destination,
        journey_date, return_date, fare
     FROM tickets";

impl ToSql for Gender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Gender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse::<Gender>()
            .map_err(|err| FromSqlError::Other(format!("unknown gender {:?}", err.0).into()))
    }
}

/// Durable, keyed collection of reservations backed by one SQLite file.
///
/// The store never validates: callers hand it a [`NewReservation`] that has
/// already been through [`crate::validation::validate`]. Every method is a
/// single statement, so a write is either fully visible or not at all.
pub struct ReservationStore {
    conn: Connection,
}

impl ReservationStore {
    /// Open the database file, creating the schema if this is a fresh file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = open_database(path)?;
        info!(path = %path.display(), "reservation store opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }

    /// Insert a booking and return it hydrated with the id SQLite assigned.
    pub fn create(&self, booking: &NewReservation) -> Result<Reservation, StoreError> {
        self.conn.execute(
            "INSERT INTO tickets (passenger_name, age, gender, source, destination,
                journey_date, return_date, fare)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                booking.passenger_name,
                booking.age,
                booking.gender,
                booking.source,
                booking.destination,
                booking.journey_date,
                booking.return_date,
                booking.fare,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "ticket inserted");
        Ok(Reservation::from_new(id, booking.clone()))
    }

    pub fn fetch_by_id(&self, id: i64) -> Result<Option<Reservation>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let reservation = stmt.query_row([id], map_row).optional()?;
        Ok(reservation)
    }

    /// Case-insensitive substring match on the passenger name, in insertion
    /// order. The needle is matched literally, so `%` and `_` carry no
    /// wildcard meaning.
    pub fn fetch_by_name_substring(&self, needle: &str) -> Result<Vec<Reservation>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE instr(lower(passenger_name), lower(?1)) > 0 ORDER BY id"
        ))?;
        let reservations = stmt
            .query_map([needle], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reservations)
    }

    /// Snapshot of every reservation in insertion order.
    pub fn fetch_all(&self) -> Result<Vec<Reservation>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let reservations = stmt
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reservations)
    }

    /// Permanently remove a reservation. Returns whether a row existed; absence
    /// is not an error at this layer.
    pub fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM tickets WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Flush and release the underlying connection.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::from(err))?;
        info!("reservation store closed");
        Ok(())
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        passenger_name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        source: row.get(4)?,
        destination: row.get(5)?,
        journey_date: row.get(6)?,
        return_date: row.get(7)?,
        fare: row.get(8)?,
    })
}
