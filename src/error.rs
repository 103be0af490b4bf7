//! Typed failures surfaced by the desk. Every variant renders a message that
//! the footer can show as-is, so the UI never has to pattern-match to build
//! user-facing text.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejections raised by [`crate::validation::validate`]. None of these ever
/// reach the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("{0} must not contain line breaks or control characters.")]
    ControlCharacter(&'static str),

    #[error("{field} must be a date in YYYY-MM-DD format (got \"{value}\").")]
    DateFormat { field: &'static str, value: String },

    #[error("Return date must be after journey date.")]
    DateOrder,

    #[error("{field} must be a number (got \"{value}\").")]
    NumericFormat { field: &'static str, value: String },

    #[error("Age and Fare must be non-negative.")]
    Range,

    #[error("Gender must be one of Male, Female or Other (got \"{0}\").")]
    UnknownGender(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("failed to prepare database location {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to encode ticket barcode: {0}")]
    Barcode(#[from] qrcode::types::QrError),

    #[error("failed to build ticket PDF: {0}")]
    Pdf(String),

    #[error("failed to handle barcode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Umbrella error returned by [`crate::desk::Desk::execute`].
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl DeskError {
    pub fn ticket_not_found(id: i64) -> Self {
        DeskError::NotFound(format!("Ticket ID {id} not found!"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeskError::NotFound(_))
    }
}
