//! Availability engine
//!
//! Derives, per staff member and calendar day, two independent slot sets:
//! `available` from the weekly schedules and `blocked` from the time blocks.
//! A slot is bookable iff it is available and not blocked, so blocks always
//! win without the two sets ever being merged.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{StaffMember, TimeBlock, WeeklySchedule};
use crate::time::{DAY_END, DAY_START, SlotTime, slots_between};

/// Why a slot or interval cannot take an appointment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotRejection {
    #[error("{0} is not on a 15-minute boundary")]
    NotOnBoundary(SlotTime),

    #[error("{slot} is outside the working schedule")]
    Unavailable { slot: SlotTime },

    #[error("{slot} is blocked{}", reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    Blocked {
        slot: SlotTime,
        reason: Option<String>,
    },

    #[error("{start}-{end} does not fit in a working window")]
    ExceedsSchedule { start: SlotTime, end: SlotTime },

    #[error("{start}-{end} runs into a time block")]
    OverlapsBlock { start: SlotTime, end: SlotTime },

    #[error("appointment would end after midnight")]
    PastEndOfDay,

    #[error("duration must be positive")]
    InvalidDuration,

    #[error("overlaps appointment {appointment_id}")]
    Overlap { appointment_id: i64 },

    #[error("appointment {0} can no longer be moved")]
    AppointmentClosed(i64),

    #[error("staff member {0} is not on the calendar")]
    UnknownStaff(i64),

    #[error("drop target is outside the calendar")]
    OffGrid,
}

impl SlotRejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotOnBoundary(_) | Self::InvalidDuration | Self::OffGrid => {
                ErrorCode::ValidationFailed
            }
            Self::Unavailable { .. } => ErrorCode::SlotUnavailable,
            Self::Blocked { .. } | Self::OverlapsBlock { .. } => ErrorCode::SlotBlocked,
            Self::ExceedsSchedule { .. } | Self::PastEndOfDay => ErrorCode::OutsideSchedule,
            Self::Overlap { .. } => ErrorCode::AppointmentOverlap,
            Self::AppointmentClosed(_) => ErrorCode::AppointmentClosed,
            Self::UnknownStaff(_) => ErrorCode::StaffNotFound,
        }
    }
}

impl From<SlotRejection> for AppError {
    fn from(rejection: SlotRejection) -> Self {
        AppError::with_message(rejection.code(), rejection.to_string())
    }
}

/// Availability of one staff member on one date
#[derive(Debug, Clone)]
pub struct DayAvailability {
    pub staff_id: i64,
    pub date: NaiveDate,
    available: BTreeSet<SlotTime>,
    blocked: BTreeSet<SlotTime>,
    windows: Vec<(SlotTime, SlotTime)>,
    blocks: Vec<TimeBlock>,
}

impl DayAvailability {
    /// Run the engine for `staff` on `date`
    pub fn compute(staff: &StaffMember, date: NaiveDate) -> Self {
        Self::from_parts(staff.id, date, &staff.schedules, &staff.blocks)
    }

    pub fn from_parts(
        staff_id: i64,
        date: NaiveDate,
        schedules: &[WeeklySchedule],
        blocks: &[TimeBlock],
    ) -> Self {
        let windows: Vec<(SlotTime, SlotTime)> = schedules
            .iter()
            .filter(|s| s.staff_id == staff_id && s.applies_on(date))
            .map(|s| (s.start_time, s.end_time))
            .collect();

        let available = windows
            .iter()
            .flat_map(|&(start, end)| slots_between(start, end))
            .collect();

        let blocks: Vec<TimeBlock> = blocks
            .iter()
            .filter(|b| b.staff_id == staff_id && b.applies_on(date))
            .cloned()
            .collect();

        let blocked = blocks
            .iter()
            .flat_map(|b| {
                let (start, end) = block_range(b);
                slots_between(start, end)
            })
            .collect();

        Self {
            staff_id,
            date,
            available,
            blocked,
            windows,
            blocks,
        }
    }

    /// Slots inside an active weekly window
    pub fn available(&self) -> &BTreeSet<SlotTime> {
        &self.available
    }

    /// Slots covered by a time block
    pub fn blocked(&self) -> &BTreeSet<SlotTime> {
        &self.blocked
    }

    pub fn is_available(&self, slot: SlotTime) -> bool {
        self.available.contains(&slot)
    }

    pub fn is_blocked(&self, slot: SlotTime) -> bool {
        self.blocked.contains(&slot)
    }

    pub fn is_bookable(&self, slot: SlotTime) -> bool {
        self.is_available(slot) && !self.is_blocked(slot)
    }

    /// Bookable slots in ascending order
    pub fn bookable_slots(&self) -> impl Iterator<Item = SlotTime> + '_ {
        self.available
            .iter()
            .copied()
            .filter(|slot| !self.blocked.contains(slot))
    }

    /// Whether the staff member works at all that day
    pub fn is_working_day(&self) -> bool {
        !self.windows.is_empty()
    }

    /// Whether a whole-day block covers the date
    pub fn is_blocked_all_day(&self) -> bool {
        self.blocks.iter().any(TimeBlock::is_all_day)
    }

    /// Reason of the first block covering `slot`
    pub fn block_reason(&self, slot: SlotTime) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| {
                let (start, end) = block_range(b);
                start <= slot && slot < end
            })
            .and_then(|b| b.reason.as_deref())
    }

    /// Check a single slot, the rule applied to slot clicks and drops
    pub fn check_slot(&self, slot: SlotTime) -> Result<(), SlotRejection> {
        if !slot.is_slot_boundary() {
            return Err(SlotRejection::NotOnBoundary(slot));
        }
        if self.is_blocked(slot) {
            return Err(SlotRejection::Blocked {
                slot,
                reason: self.block_reason(slot).map(str::to_string),
            });
        }
        if !self.is_available(slot) {
            return Err(SlotRejection::Unavailable { slot });
        }
        Ok(())
    }

    /// Check the appointment invariant for `[start, start + duration)`:
    /// the interval lies inside one active window and touches no block
    pub fn check_interval(&self, start: SlotTime, duration_minutes: u32) -> Result<(), SlotRejection> {
        if duration_minutes == 0 {
            return Err(SlotRejection::InvalidDuration);
        }
        self.check_slot(start)?;

        let end = start
            .add_minutes(duration_minutes)
            .ok_or(SlotRejection::PastEndOfDay)?;

        let fits_window = self
            .windows
            .iter()
            .any(|&(w_start, w_end)| start >= w_start && end <= w_end);
        if !fits_window {
            return Err(SlotRejection::ExceedsSchedule { start, end });
        }

        let hits_block = self.blocks.iter().any(|b| {
            let (b_start, b_end) = block_range(b);
            start < b_end && b_start < end
        });
        if hits_block {
            return Err(SlotRejection::OverlapsBlock { start, end });
        }

        Ok(())
    }
}

/// Time range a block covers on a date it applies to
fn block_range(block: &TimeBlock) -> (SlotTime, SlotTime) {
    block.time_range().unwrap_or((DAY_START, DAY_END))
}

/// Availability of every staff member for one date, keyed by staff id
pub fn compute_day(staff: &[StaffMember], date: NaiveDate) -> HashMap<i64, DayAvailability> {
    let availability: HashMap<i64, DayAvailability> = staff
        .iter()
        .map(|member| (member.id, DayAvailability::compute(member, date)))
        .collect();

    tracing::debug!(
        %date,
        staff = availability.len(),
        working = availability.values().filter(|a| a.is_working_day()).count(),
        "Computed day availability"
    );

    availability
}
