use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::StoreError;

/// Open (or create) the SQLite file at `path` and make sure the `tickets`
/// table exists. Parent directories are created on demand so a fresh data
/// directory works on first launch.
pub(crate) fn open_database(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!(path = %path.display(), "opening ticket database");
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema, used by tests and dry runs.
pub(crate) fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Lazy migration: create the single `tickets` table if absent. Dates are
/// kept as `YYYY-MM-DD` text, fares as REAL.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            passenger_name TEXT,
            age INTEGER,
            gender TEXT,
            source TEXT,
            destination TEXT,
            journey_date TEXT,
            return_date TEXT,
            fare REAL
        )",
        [],
    )?;
    Ok(())
}
