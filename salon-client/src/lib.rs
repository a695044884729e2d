//! Salon Client - HTTP client and state stores for the salon backend
//!
//! Provides the REST calls behind [`SalonApi`] and the calendar and cash
//! drawer stores that drive the operator screens.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod store;

pub use api::SalonApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, GENERIC_ERROR_MESSAGE};
pub use http::HttpClient;
pub use notify::{Notifier, Toast, ToastLevel, TracingNotifier};
pub use store::{BookingRequest, CajaStore, CalendarStore};
