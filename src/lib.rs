//! Core library surface for the ticket desk.
//!
//! Everything the terminal front end does goes through [`Desk`], so the same
//! pieces can be driven from tests or other tooling without a terminal.
pub mod analytics;
pub mod config;
pub mod db;
pub mod desk;
pub mod document;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod validation;

pub use config::Config;
pub use db::ReservationStore;
pub use desk::{Command, Desk, Outcome};
pub use error::{DeskError, DocumentError, ExportError, StoreError, ValidationError};
pub use models::{Gender, RawReservation, Reservation};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
