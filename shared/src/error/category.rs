//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 4xxx: Appointment errors
/// - 5xxx: Cash drawer errors
/// - 6xxx: Catalog errors
/// - 8xxx: Staff errors
/// - 9xxx: System errors
///
/// Unassigned ranges (3xxx, 7xxx) fall back to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Appointment errors (4xxx)
    Appointment,
    /// Cash drawer errors (5xxx)
    CashDrawer,
    /// Catalog, invoice and commission errors (6xxx)
    Catalog,
    /// Staff errors (8xxx)
    Staff,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Appointment,
            5000..6000 => Self::CashDrawer,
            6000..7000 => Self::Catalog,
            8000..9000 => Self::Staff,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Appointment => "appointment",
            Self::CashDrawer => "cash_drawer",
            Self::Catalog => "catalog",
            Self::Staff => "staff",
            Self::System => "system",
        }
    }

    /// Whether errors of this category are shown to the operator as-is
    ///
    /// System errors are logged and replaced by a generic message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::System)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
