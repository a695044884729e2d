//! Shared types for the salon back office
//!
//! Domain models, the availability engine, calendar grid layout and the
//! money calculators. No I/O happens in this crate.

pub mod availability;
pub mod commission;
pub mod error;
pub mod grid;
pub mod models;
pub mod reconciliation;
pub mod time;

// Re-exports
pub use http;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use availability::{DayAvailability, SlotRejection};
pub use error::{AppError, AppResult, ErrorCode};
pub use time::SlotTime;
