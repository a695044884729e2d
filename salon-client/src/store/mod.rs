//! Page state stores

pub mod caja;
pub mod calendar;

pub use caja::{CajaState, CajaStore};
pub use calendar::{BookingRequest, CalendarState, CalendarStore};
