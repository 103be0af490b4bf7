//! Persistence module split across logical submodules.

mod connection;
mod reservations;

pub use reservations::ReservationStore;
