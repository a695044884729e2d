//! Calendar store
//!
//! Owns the day being shown: staff (fetched once per load), the day's
//! appointments and the derived availability. Every mutation is validated
//! locally first, sent, and followed by a full re-fetch; nothing is updated
//! optimistically.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::availability::{DayAvailability, SlotRejection, compute_day};
use shared::grid::{self, DayGrid, GridConfig};
use shared::models::{
    Appointment, AppointmentCreate, AppointmentState, AppointmentStateUpdate, StaffMember,
};
use shared::SlotTime;

use crate::notify::{Notifier, Toast, report};
use crate::{ClientError, ClientResult, SalonApi};

/// Snapshot of what the calendar shows
#[derive(Debug, Clone)]
pub struct CalendarState {
    pub date: NaiveDate,
    pub staff: Vec<StaffMember>,
    pub appointments: Vec<Appointment>,
    pub availability: HashMap<i64, DayAvailability>,
    /// Set after a mutation until the next successful refresh
    pub stale: bool,
}

impl CalendarState {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            staff: Vec::new(),
            appointments: Vec::new(),
            availability: HashMap::new(),
            stale: true,
        }
    }
}

/// A booking request coming from a slot click
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub staff_id: i64,
    pub slot: SlotTime,
    pub client_id: i64,
    pub service_id: i64,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

pub struct CalendarStore {
    api: Arc<dyn SalonApi>,
    notifier: Arc<dyn Notifier>,
    config: GridConfig,
    state: CalendarState,
}

impl CalendarStore {
    pub fn new(api: Arc<dyn SalonApi>, notifier: Arc<dyn Notifier>, date: NaiveDate) -> Self {
        Self {
            api,
            notifier,
            config: GridConfig::default(),
            state: CalendarState::empty(date),
        }
    }

    pub fn with_grid_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn date(&self) -> NaiveDate {
        self.state.date
    }

    /// Fetch staff and the day's appointments
    pub async fn load(&mut self) -> ClientResult<()> {
        let staff = match self.api.list_staff().await {
            Ok(staff) => staff,
            Err(e) => return Err(self.fail("Loading staff", e)),
        };
        self.state.staff = staff.into_iter().filter(|s| s.is_active).collect();
        self.state.stale = true;
        self.refresh().await
    }

    /// Switch to another day; staff are kept, appointments re-fetched
    pub async fn set_date(&mut self, date: NaiveDate) -> ClientResult<()> {
        if date != self.state.date {
            self.state.date = date;
            self.invalidate();
        }
        self.refresh().await
    }

    /// Mark the appointment data as out of date
    pub fn invalidate(&mut self) {
        self.state.stale = true;
    }

    /// Re-fetch the day's appointments when stale and recompute availability
    pub async fn refresh(&mut self) -> ClientResult<()> {
        if !self.state.stale {
            return Ok(());
        }
        let date = self.state.date;
        let appointments = match self.api.list_appointments(date).await {
            Ok(list) => list,
            Err(e) => return Err(self.fail("Loading appointments", e)),
        };

        self.state.appointments = appointments;
        self.state.availability = compute_day(&self.state.staff, date);
        self.state.stale = false;
        tracing::info!(
            %date,
            staff = self.state.staff.len(),
            appointments = self.state.appointments.len(),
            "Calendar loaded"
        );
        Ok(())
    }

    pub fn grid(&self) -> DayGrid {
        grid::layout(
            self.state.date,
            &self.state.staff,
            &self.state.appointments,
            &self.state.availability,
            self.config,
        )
    }

    pub fn availability(&self, staff_id: i64) -> Option<&DayAvailability> {
        self.state.availability.get(&staff_id)
    }

    pub fn appointment(&self, id: i64) -> Option<&Appointment> {
        self.state.appointments.iter().find(|a| a.id == id)
    }

    /// Whether a click on `slot` of `staff_id` may open the booking form
    pub fn is_bookable(&self, staff_id: i64, slot: SlotTime) -> bool {
        self.availability(staff_id)
            .is_some_and(|day| day.is_bookable(slot))
    }

    /// Drop an appointment card onto a column at a pixel offset
    pub async fn drop_at(&mut self, appointment_id: i64, target_staff_id: i64, y: i32) -> ClientResult<bool> {
        let Some(slot) = self.config.slot_at(y) else {
            return Err(self.fail("Moving appointment", SlotRejection::OffGrid.into()));
        };
        self.drop_appointment(appointment_id, target_staff_id, slot).await
    }

    /// Drop an appointment card onto `target_slot` of `target_staff_id`
    ///
    /// Invalid targets are refused without a network call. Returns
    /// `Ok(false)` when the drop lands where the appointment already is.
    pub async fn drop_appointment(
        &mut self,
        appointment_id: i64,
        target_staff_id: i64,
        target_slot: SlotTime,
    ) -> ClientResult<bool> {
        let payload = match self.validate_drop(appointment_id, target_staff_id, target_slot) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(false),
            Err(e) => return Err(self.fail("Moving appointment", e)),
        };

        if let Err(e) = self.api.reassign_appointment(appointment_id, &payload).await {
            return Err(self.fail("Moving appointment", e));
        }
        tracing::info!(
            appointment_id,
            staff_id = payload.staff_id,
            start = %payload.start_time,
            "Appointment reassigned"
        );
        self.notifier.notify(Toast::success("Appointment moved"));

        self.invalidate();
        self.refresh().await?;
        Ok(true)
    }

    fn validate_drop(
        &self,
        appointment_id: i64,
        target_staff_id: i64,
        target_slot: SlotTime,
    ) -> ClientResult<Option<shared::models::AppointmentMove>> {
        let appointment = self
            .appointment(appointment_id)
            .ok_or_else(|| ClientError::NotFound(format!("appointment {}", appointment_id)))?;

        if appointment.staff_id == target_staff_id && appointment.start_slot() == target_slot {
            return Ok(None);
        }

        let target = self
            .availability(target_staff_id)
            .ok_or(SlotRejection::UnknownStaff(target_staff_id))?;

        let payload = grid::validate_move(appointment, target, target_slot, &self.state.appointments)?;
        Ok(Some(payload))
    }

    /// Book from a slot click
    pub async fn book(&mut self, request: BookingRequest) -> ClientResult<Appointment> {
        let start_time = match self.validate_booking(&request) {
            Ok(start) => start,
            Err(e) => return Err(self.fail("Booking appointment", e)),
        };

        let payload = AppointmentCreate {
            client_id: request.client_id,
            staff_id: request.staff_id,
            service_id: request.service_id,
            start_time,
            duration_minutes: request.duration_minutes,
            notes: request.notes,
        };
        let created = match self.api.create_appointment(&payload).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail("Booking appointment", e)),
        };
        tracing::info!(appointment_id = created.id, staff_id = created.staff_id, "Appointment booked");
        self.notifier.notify(Toast::success("Appointment booked"));

        self.invalidate();
        self.refresh().await?;
        Ok(created)
    }

    fn validate_booking(&self, request: &BookingRequest) -> ClientResult<chrono::NaiveDateTime> {
        let day = self
            .availability(request.staff_id)
            .ok_or(SlotRejection::UnknownStaff(request.staff_id))?;
        Ok(grid::validate_booking(
            day,
            request.slot,
            request.duration_minutes,
            &self.state.appointments,
        )?)
    }

    /// Move an appointment through its lifecycle
    pub async fn change_state(
        &mut self,
        appointment_id: i64,
        next: AppointmentState,
        reason: Option<String>,
    ) -> ClientResult<Appointment> {
        let checked = self
            .appointment(appointment_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("appointment {}", appointment_id)))
            .and_then(|mut a| a.transition(next).map_err(ClientError::from));
        if let Err(e) = checked {
            return Err(self.fail("Updating appointment", e));
        }

        let payload = AppointmentStateUpdate {
            state: next,
            reason,
        };
        let updated = match self.api.update_appointment_state(appointment_id, &payload).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.fail("Updating appointment", e)),
        };
        tracing::info!(appointment_id, state = next.label(), "Appointment state changed");
        self.notifier
            .notify(Toast::success(format!("Appointment is now {}", next.label().replace('_', " "))));

        self.invalidate();
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn cancel(&mut self, appointment_id: i64, reason: Option<String>) -> ClientResult<Appointment> {
        self.change_state(appointment_id, AppointmentState::Cancelled, reason)
            .await
    }

    fn fail(&self, context: &str, err: ClientError) -> ClientError {
        report(self.notifier.as_ref(), context, &err);
        err
    }
}
