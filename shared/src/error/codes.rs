//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission and role errors
//! - 4xxx: Appointment (cita) errors
//! - 5xxx: Cash drawer (caja) errors
//! - 6xxx: Catalog, invoice and commission errors
//! - 8xxx: Staff (especialista) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so the backend and the client agree
/// on a single numeric space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Role not found
    RoleNotFound = 2101,
    /// Role name already exists
    RoleNameExists = 2102,
    /// Role is still assigned to staff
    RoleInUse = 2103,

    // ==================== 4xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 4001,
    /// Slot is outside the staff member's working schedule
    SlotUnavailable = 4002,
    /// Slot is covered by a time block
    SlotBlocked = 4003,
    /// Appointment runs past the end of the working window
    OutsideSchedule = 4004,
    /// Appointment overlaps another appointment of the same staff member
    AppointmentOverlap = 4005,
    /// State transition not allowed
    InvalidStateTransition = 4006,
    /// Appointment is in a terminal state
    AppointmentClosed = 4007,

    // ==================== 5xxx: Cash drawer ====================
    /// Cash drawer session not found
    CajaNotFound = 5001,
    /// No open cash drawer session
    CajaNotOpen = 5002,
    /// A cash drawer session is already open
    CajaAlreadyOpen = 5003,
    /// Cash drawer session already closed
    CajaAlreadyClosed = 5004,
    /// Invalid cash amount
    InvalidAmount = 5005,
    /// Cash movement not found
    MovementNotFound = 5006,

    // ==================== 6xxx: Catalog / Invoice ====================
    /// Service not found
    ServiceNotFound = 6001,
    /// Invalid commission rule
    InvalidCommission = 6101,
    /// Invoice not found
    InvoiceNotFound = 6201,

    // ==================== 8xxx: Staff ====================
    /// Staff member not found
    StaffNotFound = 8001,
    /// Staff member is inactive
    StaffInactive = 8002,
    /// Weekly schedule is invalid
    ScheduleInvalid = 8003,
    /// Time block is invalid
    BlockInvalid = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backend response could not be understood
    InvalidResponse = 9002,
    /// Network error
    NetworkError = 9003,
    /// Request timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role name already exists",
            ErrorCode::RoleInUse => "Role is assigned to staff members",

            // Appointment
            ErrorCode::AppointmentNotFound => "Appointment not found",
            ErrorCode::SlotUnavailable => "Slot is outside the working schedule",
            ErrorCode::SlotBlocked => "Slot is blocked",
            ErrorCode::OutsideSchedule => "Appointment does not fit the working schedule",
            ErrorCode::AppointmentOverlap => "Appointment overlaps another appointment",
            ErrorCode::InvalidStateTransition => "Appointment state change not allowed",
            ErrorCode::AppointmentClosed => "Appointment is already closed",

            // Cash drawer
            ErrorCode::CajaNotFound => "Cash drawer session not found",
            ErrorCode::CajaNotOpen => "No cash drawer session is open",
            ErrorCode::CajaAlreadyOpen => "A cash drawer session is already open",
            ErrorCode::CajaAlreadyClosed => "Cash drawer session is already closed",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::MovementNotFound => "Cash movement not found",

            // Catalog
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::InvalidCommission => "Invalid commission rule",
            ErrorCode::InvoiceNotFound => "Invoice not found",

            // Staff
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::StaffInactive => "Staff member is inactive",
            ErrorCode::ScheduleInvalid => "Weekly schedule is invalid",
            ErrorCode::BlockInvalid => "Time block is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::InvalidResponse => "Invalid response from server",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2101 => Ok(ErrorCode::RoleNotFound),
            2102 => Ok(ErrorCode::RoleNameExists),
            2103 => Ok(ErrorCode::RoleInUse),

            // Appointment
            4001 => Ok(ErrorCode::AppointmentNotFound),
            4002 => Ok(ErrorCode::SlotUnavailable),
            4003 => Ok(ErrorCode::SlotBlocked),
            4004 => Ok(ErrorCode::OutsideSchedule),
            4005 => Ok(ErrorCode::AppointmentOverlap),
            4006 => Ok(ErrorCode::InvalidStateTransition),
            4007 => Ok(ErrorCode::AppointmentClosed),

            // Cash drawer
            5001 => Ok(ErrorCode::CajaNotFound),
            5002 => Ok(ErrorCode::CajaNotOpen),
            5003 => Ok(ErrorCode::CajaAlreadyOpen),
            5004 => Ok(ErrorCode::CajaAlreadyClosed),
            5005 => Ok(ErrorCode::InvalidAmount),
            5006 => Ok(ErrorCode::MovementNotFound),

            // Catalog
            6001 => Ok(ErrorCode::ServiceNotFound),
            6101 => Ok(ErrorCode::InvalidCommission),
            6201 => Ok(ErrorCode::InvoiceNotFound),

            // Staff
            8001 => Ok(ErrorCode::StaffNotFound),
            8002 => Ok(ErrorCode::StaffInactive),
            8003 => Ok(ErrorCode::ScheduleInvalid),
            8004 => Ok(ErrorCode::BlockInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::InvalidResponse),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
