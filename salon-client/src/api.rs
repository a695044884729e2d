//! Backend operations used by the stores
//!
//! [`SalonApi`] is the seam between the stores and the network; the HTTP
//! implementation maps each operation onto one REST call.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Appointment, AppointmentCreate, AppointmentMove, AppointmentStateUpdate, CajaClose, CajaOpen,
    CajaSession, CashMovement, CashMovementCreate, Role, StaffMember,
};

use crate::{ClientError, ClientResult, HttpClient};

#[async_trait]
pub trait SalonApi: Send + Sync {
    /// Staff members with their schedules and blocks
    async fn list_staff(&self) -> ClientResult<Vec<StaffMember>>;

    /// Appointments starting on `date`
    async fn list_appointments(&self, date: NaiveDate) -> ClientResult<Vec<Appointment>>;

    async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment>;

    /// Reassign staff and/or start time
    async fn reassign_appointment(&self, id: i64, payload: &AppointmentMove) -> ClientResult<Appointment>;

    async fn update_appointment_state(
        &self,
        id: i64,
        payload: &AppointmentStateUpdate,
    ) -> ClientResult<Appointment>;

    /// The open cash drawer session, if any
    async fn current_caja(&self) -> ClientResult<Option<CajaSession>>;

    async fn list_movements(&self, caja_id: i64) -> ClientResult<Vec<CashMovement>>;

    async fn open_caja(&self, payload: &CajaOpen) -> ClientResult<CajaSession>;

    async fn register_movement(
        &self,
        caja_id: i64,
        payload: &CashMovementCreate,
    ) -> ClientResult<CashMovement>;

    /// Submit a blind close; the response discloses the expected total
    async fn close_caja(&self, caja_id: i64, payload: &CajaClose) -> ClientResult<CajaSession>;

    async fn list_roles(&self) -> ClientResult<Vec<Role>>;
}

#[async_trait]
impl SalonApi for HttpClient {
    async fn list_staff(&self) -> ClientResult<Vec<StaffMember>> {
        self.get("especialistas").await
    }

    async fn list_appointments(&self, date: NaiveDate) -> ClientResult<Vec<Appointment>> {
        let fecha = date.format("%Y-%m-%d").to_string();
        self.get_query("citas", &[("fecha", fecha)]).await
    }

    async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment> {
        self.post("citas", payload).await
    }

    async fn reassign_appointment(&self, id: i64, payload: &AppointmentMove) -> ClientResult<Appointment> {
        self.put(&format!("citas/{}/reasignar", id), payload).await
    }

    async fn update_appointment_state(
        &self,
        id: i64,
        payload: &AppointmentStateUpdate,
    ) -> ClientResult<Appointment> {
        self.patch(&format!("citas/{}/estado", id), payload).await
    }

    async fn current_caja(&self) -> ClientResult<Option<CajaSession>> {
        // No open session is reported either as 404 or as a null body
        match self.get::<Option<CajaSession>>("caja/actual").await {
            Err(ClientError::NotFound(_)) => Ok(None),
            other => other,
        }
    }

    async fn list_movements(&self, caja_id: i64) -> ClientResult<Vec<CashMovement>> {
        self.get(&format!("caja/{}/movimientos", caja_id)).await
    }

    async fn open_caja(&self, payload: &CajaOpen) -> ClientResult<CajaSession> {
        self.post("caja/abrir", payload).await
    }

    async fn register_movement(
        &self,
        caja_id: i64,
        payload: &CashMovementCreate,
    ) -> ClientResult<CashMovement> {
        self.post(&format!("caja/{}/movimientos", caja_id), payload).await
    }

    async fn close_caja(&self, caja_id: i64, payload: &CajaClose) -> ClientResult<CajaSession> {
        self.post(&format!("caja/{}/cerrar", caja_id), payload).await
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.get("roles").await
    }
}
