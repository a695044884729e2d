//! In-memory backend for store tests

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use http::StatusCode;
use rust_decimal::Decimal;
use salon_client::http::error_from_response;
use salon_client::{ClientResult, Notifier, SalonApi, Toast};
use shared::models::*;
use shared::reconciliation::{CashTotals, theoretical_cash};
use shared::time::parse_date;
use shared::SlotTime;

pub const MONDAY: &str = "2024-06-03";

pub fn monday() -> NaiveDate {
    parse_date(MONDAY).unwrap()
}

pub fn t(s: &str) -> SlotTime {
    s.parse().unwrap()
}

pub fn at(s: &str) -> NaiveDateTime {
    t(s).on(monday())
}

pub fn staff_member(id: i64, name: &str, start: &str, end: &str) -> StaffMember {
    StaffMember {
        id,
        name: name.into(),
        initials: None,
        color: "#009688".into(),
        schedules: vec![WeeklySchedule {
            id: Some(id * 10),
            staff_id: id,
            day_of_week: 1,
            start_time: t(start),
            end_time: t(end),
            active: true,
        }],
        blocks: vec![],
        commission: Some(shared::commission::CommissionRule::percentage(40)),
        is_active: true,
    }
}

pub fn whole_day_block(staff_id: i64, date: NaiveDate) -> TimeBlock {
    TimeBlock {
        id: None,
        staff_id,
        start_date: date,
        end_date: date,
        start_time: None,
        end_time: None,
        reason: Some("Vacaciones".into()),
    }
}

pub fn appointment(id: i64, staff_id: i64, start: &str, minutes: u32) -> Appointment {
    Appointment {
        id,
        client_id: 500 + id,
        client_name: Some(format!("Clienta {id}")),
        staff_id,
        service_id: 1,
        service_name: Some("Manicura".into()),
        start_time: at(start),
        duration_minutes: minutes,
        state: AppointmentState::Scheduled,
        notes: None,
    }
}

/// Backend fake that records every call it receives
#[derive(Default)]
pub struct FakeApi {
    pub staff: Mutex<Vec<StaffMember>>,
    pub appointments: Mutex<Vec<Appointment>>,
    pub caja: Mutex<Option<CajaSession>>,
    pub movements: Mutex<Vec<CashMovement>>,
    pub roles: Mutex<Vec<Role>>,
    calls: Mutex<Vec<String>>,
    /// Status and body the next mutating call fails with
    reject_next: Mutex<Option<(StatusCode, String)>>,
    /// Persist closes but answer without the counted cash
    pub incomplete_close: AtomicBool,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn new(staff: Vec<StaffMember>, appointments: Vec<Appointment>) -> Self {
        let api = Self::default();
        *api.staff.lock().unwrap() = staff;
        *api.appointments.lock().unwrap() = appointments;
        api.next_id.store(1000, Ordering::SeqCst);
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub fn reject_next(&self, status: StatusCode, body: &str) {
        *self.reject_next.lock().unwrap() = Some((status, body.to_string()));
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn mutation(&self, name: &str) -> ClientResult<()> {
        self.record(name);
        match self.reject_next.lock().unwrap().take() {
            Some((status, body)) => Err(error_from_response(status, &body)),
            None => Ok(()),
        }
    }

    fn id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl SalonApi for FakeApi {
    async fn list_staff(&self) -> ClientResult<Vec<StaffMember>> {
        self.record("list_staff");
        Ok(self.staff.lock().unwrap().clone())
    }

    async fn list_appointments(&self, date: NaiveDate) -> ClientResult<Vec<Appointment>> {
        self.record("list_appointments");
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.date() == date)
            .cloned()
            .collect())
    }

    async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment> {
        self.mutation("create_appointment")?;
        let created = Appointment {
            id: self.id(),
            client_id: payload.client_id,
            client_name: None,
            staff_id: payload.staff_id,
            service_id: payload.service_id,
            service_name: None,
            start_time: payload.start_time,
            duration_minutes: payload.duration_minutes,
            state: AppointmentState::Scheduled,
            notes: payload.notes.clone(),
        };
        self.appointments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn reassign_appointment(&self, id: i64, payload: &AppointmentMove) -> ClientResult<Appointment> {
        self.mutation("reassign_appointment")?;
        let mut all = self.appointments.lock().unwrap();
        let appt = all
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| error_from_response(StatusCode::NOT_FOUND, r#"{"detail":"Cita no encontrada"}"#))?;
        appt.staff_id = payload.staff_id;
        appt.start_time = payload.start_time;
        Ok(appt.clone())
    }

    async fn update_appointment_state(
        &self,
        id: i64,
        payload: &AppointmentStateUpdate,
    ) -> ClientResult<Appointment> {
        self.mutation("update_appointment_state")?;
        let mut all = self.appointments.lock().unwrap();
        let appt = all
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| error_from_response(StatusCode::NOT_FOUND, "{}"))?;
        appt.state = payload.state;
        Ok(appt.clone())
    }

    async fn current_caja(&self) -> ClientResult<Option<CajaSession>> {
        self.record("current_caja");
        Ok(self.caja.lock().unwrap().clone().filter(CajaSession::is_open))
    }

    async fn list_movements(&self, caja_id: i64) -> ClientResult<Vec<CashMovement>> {
        self.record("list_movements");
        Ok(self
            .movements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.caja_id == caja_id)
            .cloned()
            .collect())
    }

    async fn open_caja(&self, payload: &CajaOpen) -> ClientResult<CajaSession> {
        self.mutation("open_caja")?;
        let session = CajaSession {
            id: self.id(),
            operator_id: payload.operator_id,
            operator_name: payload.operator_name.clone(),
            status: CajaStatus::Open,
            opened_at: at("08:00"),
            closed_at: None,
            opening_float: payload.opening_float,
            counted_cash: None,
            expected_cash: None,
            difference: None,
            note: payload.note.clone(),
        };
        *self.caja.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn register_movement(
        &self,
        caja_id: i64,
        payload: &CashMovementCreate,
    ) -> ClientResult<CashMovement> {
        self.mutation("register_movement")?;
        let movement = CashMovement {
            id: self.id(),
            caja_id,
            kind: payload.kind,
            amount: payload.amount,
            concept: payload.concept.clone(),
            payment_method: payload.payment_method,
            invoice_id: None,
            created_at: at("12:00"),
        };
        self.movements.lock().unwrap().push(movement.clone());
        Ok(movement)
    }

    async fn close_caja(&self, caja_id: i64, payload: &CajaClose) -> ClientResult<CajaSession> {
        self.mutation("close_caja")?;
        let movements: Vec<CashMovement> = self
            .movements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.caja_id == caja_id)
            .cloned()
            .collect();
        let mut guard = self.caja.lock().unwrap();
        let session = guard
            .as_mut()
            .filter(|s| s.id == caja_id)
            .ok_or_else(|| error_from_response(StatusCode::NOT_FOUND, "{}"))?;

        let expected = theoretical_cash(session.opening_float, CashTotals::from_movements(caja_id, &movements));
        session.status = CajaStatus::Closed;
        session.closed_at = Some(at("21:00"));
        session.counted_cash = Some(payload.counted_cash);
        session.expected_cash = Some(expected);
        session.difference = Some(payload.counted_cash - expected);
        session.note = payload.note.clone();

        let mut response = session.clone();
        if self.incomplete_close.load(Ordering::SeqCst) {
            response.counted_cash = None;
        }
        Ok(response)
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.record("list_roles");
        Ok(self.roles.lock().unwrap().clone())
    }
}

/// Notifier that keeps every toast
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

pub fn money(amount: i64) -> Decimal {
    Decimal::from(amount)
}
