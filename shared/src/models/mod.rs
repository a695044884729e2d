//! Data models
//!
//! Shared between the client stores and the operator binary, shaped after
//! the backend's JSON. All IDs are `i64`, all money is `Decimal`.

pub mod appointment;
pub mod caja;
pub mod invoice;
pub mod role;
pub mod staff;

// Re-exports
pub use appointment::*;
pub use caja::*;
pub use invoice::*;
pub use role::*;
pub use staff::*;
