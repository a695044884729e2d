//! Calendar grid layout
//!
//! Rows are the 15-minute slots of the 06:00-22:00 day, columns are staff
//! members. Appointment cards are positioned in pixels from the top of the
//! grid. Also hosts the drag-and-drop and slot-click validation, which run
//! entirely on local data.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::availability::{DayAvailability, SlotRejection};
use crate::models::{Appointment, AppointmentMove, AppointmentState, StaffMember};
use crate::time::{DAY_END, DAY_START, SLOT_MINUTES, SlotTime, day_slots};

/// Default pixel height of one slot row
pub const DEFAULT_SLOT_HEIGHT: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub slot_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            slot_height: DEFAULT_SLOT_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(slot_height: u32) -> Self {
        Self { slot_height }
    }

    /// Pixel offset of `start` from the 06:00 row; negative before 06:00
    pub fn top_of(&self, start: SlotTime) -> i32 {
        let minutes = start.minutes_since(DAY_START);
        minutes * self.slot_height as i32 / i32::from(SLOT_MINUTES)
    }

    /// Pixel height of an appointment lasting `duration_minutes`
    pub fn height_of(&self, duration_minutes: u32) -> u32 {
        duration_minutes.saturating_mul(self.slot_height) / u32::from(SLOT_MINUTES)
    }

    /// Total pixel height of the rendered day
    pub fn total_height(&self) -> u32 {
        self.height_of(u32::from(DAY_END.minutes() - DAY_START.minutes()))
    }

    /// Slot row under a vertical pixel offset, used to resolve drops
    pub fn slot_at(&self, y: i32) -> Option<SlotTime> {
        if y < 0 || self.slot_height == 0 {
            return None;
        }
        let row = y as u32 / self.slot_height;
        let minutes = u32::from(DAY_START.minutes())
            .saturating_add(row.saturating_mul(u32::from(SLOT_MINUTES)));
        let slot = SlotTime::from_minutes(u16::try_from(minutes).ok()?)?;
        (slot < DAY_END).then_some(slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Bookable,
    Blocked,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub time: SlotTime,
    pub state: CellState,
}

/// A positioned appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCard {
    pub appointment_id: i64,
    pub staff_id: i64,
    pub start: SlotTime,
    pub end: SlotTime,
    pub top: i32,
    pub height: u32,
    pub state: AppointmentState,
    pub title: String,
    pub subtitle: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffColumn {
    pub staff_id: i64,
    pub name: String,
    pub initials: String,
    pub color: String,
    pub cells: Vec<GridCell>,
    pub cards: Vec<AppointmentCard>,
}

impl StaffColumn {
    pub fn cell(&self, time: SlotTime) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.time == time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub config: GridConfig,
    pub rows: Vec<SlotTime>,
    pub columns: Vec<StaffColumn>,
    /// Appointments of the day whose staff member is not on the grid
    pub orphans: Vec<i64>,
}

impl DayGrid {
    pub fn column(&self, staff_id: i64) -> Option<&StaffColumn> {
        self.columns.iter().find(|c| c.staff_id == staff_id)
    }
}

/// Lay out one day of the calendar
///
/// Cancelled and no-show appointments free their time and are left off the
/// grid. Staff without an availability entry render as fully unavailable.
pub fn layout(
    date: NaiveDate,
    staff: &[StaffMember],
    appointments: &[Appointment],
    availability: &HashMap<i64, DayAvailability>,
    config: GridConfig,
) -> DayGrid {
    let rows: Vec<SlotTime> = day_slots().collect();

    let columns: Vec<StaffColumn> = staff
        .iter()
        .map(|member| {
            let day = availability.get(&member.id);
            let cells = rows
                .iter()
                .map(|&time| GridCell {
                    time,
                    state: match day {
                        Some(day) if day.is_blocked(time) => CellState::Blocked,
                        Some(day) if day.is_available(time) => CellState::Bookable,
                        _ => CellState::Unavailable,
                    },
                })
                .collect();

            let mut cards: Vec<AppointmentCard> = appointments
                .iter()
                .filter(|a| a.staff_id == member.id && a.date() == date && a.state.occupies_time())
                .map(|a| card(a, member, config))
                .collect();
            cards.sort_by_key(|c| (c.start, c.appointment_id));

            StaffColumn {
                staff_id: member.id,
                name: member.name.clone(),
                initials: member.display_initials(),
                color: member.color.clone(),
                cells,
                cards,
            }
        })
        .collect();

    let orphans: Vec<i64> = appointments
        .iter()
        .filter(|a| a.date() == date && a.state.occupies_time())
        .filter(|a| !staff.iter().any(|s| s.id == a.staff_id))
        .map(|a| a.id)
        .collect();
    if !orphans.is_empty() {
        tracing::warn!(%date, ?orphans, "Appointments reference staff not on the calendar");
    }

    DayGrid {
        date,
        config,
        rows,
        columns,
        orphans,
    }
}

fn card(appointment: &Appointment, member: &StaffMember, config: GridConfig) -> AppointmentCard {
    let start = appointment.start_slot();
    let end = start
        .add_minutes(appointment.duration_minutes)
        .unwrap_or(SlotTime::END_OF_DAY);
    AppointmentCard {
        appointment_id: appointment.id,
        staff_id: member.id,
        start,
        end,
        top: config.top_of(start),
        height: config.height_of(appointment.duration_minutes),
        state: appointment.state,
        title: appointment
            .client_name
            .clone()
            .unwrap_or_else(|| format!("Cliente #{}", appointment.client_id)),
        subtitle: appointment.service_name.clone(),
        color: member.color.clone(),
    }
}

/// First live appointment of `staff_id` overlapping `[start, start + duration)`
fn find_overlap<'a>(
    day_appointments: &'a [Appointment],
    staff_id: i64,
    start: NaiveDateTime,
    duration_minutes: u32,
    ignore: Option<i64>,
) -> Option<&'a Appointment> {
    let date = start.date();
    let from = u32::from(SlotTime::of(&start).minutes());
    let to = from.saturating_add(duration_minutes);
    day_appointments.iter().find(|a| {
        Some(a.id) != ignore
            && a.staff_id == staff_id
            && a.state.occupies_time()
            && a.date() == date
            && {
                let (a_start, a_end) = a.minute_range();
                a_start < to && from < a_end
            }
    })
}

/// Validate a slot click before opening the booking form
///
/// Returns the start datetime to put in the booking payload.
pub fn validate_booking(
    availability: &DayAvailability,
    slot: SlotTime,
    duration_minutes: u32,
    day_appointments: &[Appointment],
) -> Result<NaiveDateTime, SlotRejection> {
    availability.check_interval(slot, duration_minutes)?;
    let start = slot.on(availability.date);
    if let Some(existing) =
        find_overlap(day_appointments, availability.staff_id, start, duration_minutes, None)
    {
        return Err(SlotRejection::Overlap {
            appointment_id: existing.id,
        });
    }
    Ok(start)
}

/// Validate a drag-and-drop of `appointment` onto `target_slot` of the
/// column whose availability is `target`
///
/// On success returns the reassignment payload; on failure nothing may be
/// sent to the backend.
pub fn validate_move(
    appointment: &Appointment,
    target: &DayAvailability,
    target_slot: SlotTime,
    day_appointments: &[Appointment],
) -> Result<AppointmentMove, SlotRejection> {
    if appointment.state.is_terminal() {
        return Err(SlotRejection::AppointmentClosed(appointment.id));
    }
    target.check_interval(target_slot, appointment.duration_minutes)?;

    let start = target_slot.on(target.date);
    if let Some(existing) = find_overlap(
        day_appointments,
        target.staff_id,
        start,
        appointment.duration_minutes,
        Some(appointment.id),
    ) {
        return Err(SlotRejection::Overlap {
            appointment_id: existing.id,
        });
    }

    Ok(AppointmentMove {
        staff_id: target.staff_id,
        start_time: start,
    })
}
