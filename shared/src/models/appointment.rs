//! Appointment Model (citas)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::time::SlotTime;

/// Appointment lifecycle state
///
/// Appointments are never deleted; cancelling is a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentState {
    Scheduled,
    Confirmed,
    ClientArrived,
    Completed,
    Cancelled,
    NoShow,
}

impl Default for AppointmentState {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl AppointmentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Whether the appointment still holds its staff member's time
    pub fn occupies_time(self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }

    /// Allowed transitions:
    ///
    /// ```text
    /// scheduled -> confirmed -> client_arrived -> completed
    /// scheduled -> client_arrived
    /// scheduled | confirmed | client_arrived -> cancelled
    /// scheduled | confirmed -> no_show
    /// ```
    pub fn can_transition_to(self, next: AppointmentState) -> bool {
        use AppointmentState::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, ClientArrived)
                | (Confirmed, ClientArrived)
                | (ClientArrived, Completed)
                | (Scheduled | Confirmed | ClientArrived, Cancelled)
                | (Scheduled | Confirmed, NoShow)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::ClientArrived => "client_arrived",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

/// Appointment record (cita)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub client_id: i64,
    #[serde(default)]
    pub client_name: Option<String>,
    pub staff_id: i64,
    pub service_id: i64,
    #[serde(default)]
    pub service_name: Option<String>,
    /// Local wall-clock start (no timezone)
    pub start_time: NaiveDateTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub state: AppointmentState,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn start_slot(&self) -> SlotTime {
        SlotTime::of(&self.start_time)
    }

    /// Start and end as minutes since midnight, end exclusive
    pub fn minute_range(&self) -> (u32, u32) {
        let start = u32::from(self.start_slot().minutes());
        (start, start.saturating_add(self.duration_minutes))
    }

    /// Whether two appointments hold overlapping time on the same day
    pub fn overlaps(&self, other: &Appointment) -> bool {
        if self.date() != other.date() {
            return false;
        }
        let (a_start, a_end) = self.minute_range();
        let (b_start, b_end) = other.minute_range();
        a_start < b_end && b_start < a_end
    }

    /// Apply a state change, rejecting transitions the lifecycle forbids
    pub fn transition(&mut self, next: AppointmentState) -> AppResult<()> {
        if self.state.is_terminal() {
            return Err(AppError::with_message(
                ErrorCode::AppointmentClosed,
                format!("appointment {} is already {}", self.id, self.state.label()),
            ));
        }
        if !self.state.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStateTransition,
                format!(
                    "cannot move appointment {} from {} to {}",
                    self.id,
                    self.state.label(),
                    next.label()
                ),
            ));
        }
        self.state = next;
        Ok(())
    }
}

/// Book appointment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub start_time: NaiveDateTime,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

/// Staff/time reassignment payload (drag-and-drop)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentMove {
    pub staff_id: i64,
    pub start_time: NaiveDateTime,
}

/// State change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStateUpdate {
    pub state: AppointmentState,
    pub reason: Option<String>,
}
