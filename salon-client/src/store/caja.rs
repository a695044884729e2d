//! Cash drawer store
//!
//! Holds the current session and its movements. The expected closing total
//! is never derived while the drawer is open: callers only get a
//! [`BlindCloseSheet`]; the [`CloseReport`] comes out of a persisted close.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CajaClose, CajaOpen, CajaSession, CashMovement, CashMovementCreate, MovementKind, PaymentMethod,
};
use shared::reconciliation::{BlindCloseSheet, CloseReport, validate_amount};

use crate::notify::{Notifier, Toast, report};
use crate::{ClientError, ClientResult, SalonApi};

#[derive(Debug, Clone, Default)]
pub struct CajaState {
    pub session: Option<CajaSession>,
    pub movements: Vec<CashMovement>,
    /// Reveal of the most recent close made through this store
    pub last_close: Option<CloseReport>,
    pub stale: bool,
}

pub struct CajaStore {
    api: Arc<dyn SalonApi>,
    notifier: Arc<dyn Notifier>,
    state: CajaState,
}

impl CajaStore {
    pub fn new(api: Arc<dyn SalonApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: CajaState {
                stale: true,
                ..Default::default()
            },
        }
    }

    pub fn session(&self) -> Option<&CajaSession> {
        self.state.session.as_ref()
    }

    pub fn movements(&self) -> &[CashMovement] {
        &self.state.movements
    }

    pub fn last_close(&self) -> Option<&CloseReport> {
        self.state.last_close.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.session.as_ref().is_some_and(CajaSession::is_open)
    }

    pub fn invalidate(&mut self) {
        self.state.stale = true;
    }

    /// Fetch the current session and its movements
    pub async fn load(&mut self) -> ClientResult<()> {
        self.invalidate();
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        if !self.state.stale {
            return Ok(());
        }
        let session = match self.api.current_caja().await {
            Ok(session) => session,
            Err(e) => return Err(self.fail("Loading caja", e)),
        };
        let movements = match &session {
            Some(s) => match self.api.list_movements(s.id).await {
                Ok(list) => list,
                Err(e) => return Err(self.fail("Loading movements", e)),
            },
            None => Vec::new(),
        };

        tracing::info!(
            caja_id = session.as_ref().map(|s| s.id),
            movements = movements.len(),
            "Caja loaded"
        );
        self.state.session = session;
        self.state.movements = movements;
        self.state.stale = false;
        Ok(())
    }

    /// What the operator may see before counting
    pub fn blind_sheet(&self) -> ClientResult<BlindCloseSheet> {
        let session = self.open_session()?;
        Ok(BlindCloseSheet::new(session, &self.state.movements)?)
    }

    pub async fn open(
        &mut self,
        operator_id: i64,
        operator_name: impl Into<String>,
        opening_float: Decimal,
        note: Option<String>,
    ) -> ClientResult<CajaSession> {
        let checked = if self.is_open() {
            Err(AppError::new(ErrorCode::CajaAlreadyOpen).into())
        } else {
            validate_amount("opening_float", opening_float).map_err(ClientError::from)
        };
        if let Err(e) = checked {
            return Err(self.fail("Opening caja", e));
        }

        let payload = CajaOpen {
            operator_id,
            operator_name: operator_name.into(),
            opening_float,
            note,
        };
        let session = match self.api.open_caja(&payload).await {
            Ok(session) => session,
            Err(e) => return Err(self.fail("Opening caja", e)),
        };
        tracing::info!(caja_id = session.id, operator_id, %opening_float, "Caja opened");
        self.notifier.notify(Toast::success("Cash drawer opened"));

        self.state.last_close = None;
        self.invalidate();
        self.refresh().await?;
        Ok(session)
    }

    pub async fn register_movement(
        &mut self,
        kind: MovementKind,
        amount: Decimal,
        concept: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> ClientResult<CashMovement> {
        let checked = self.open_session().map(|s| s.id).and_then(|id| {
            validate_amount("amount", amount)?;
            if amount.is_zero() {
                return Err(AppError::invalid_amount("amount", "amount must be greater than zero").into());
            }
            Ok(id)
        });
        let caja_id = match checked {
            Ok(id) => id,
            Err(e) => return Err(self.fail("Registering movement", e)),
        };

        let payload = CashMovementCreate {
            kind,
            amount,
            concept: concept.into(),
            payment_method,
        };
        let movement = match self.api.register_movement(caja_id, &payload).await {
            Ok(movement) => movement,
            Err(e) => return Err(self.fail("Registering movement", e)),
        };
        tracing::info!(caja_id, movement_id = movement.id, ?kind, %amount, "Cash movement registered");
        self.notifier.notify(Toast::success("Movement registered"));

        self.invalidate();
        self.refresh().await?;
        Ok(movement)
    }

    /// Submit the operator's count and reveal the result
    pub async fn close_blind(&mut self, counted_cash: Decimal, note: Option<String>) -> ClientResult<CloseReport> {
        let checked = self.open_session().map(|s| s.id).and_then(|id| {
            validate_amount("counted_cash", counted_cash)?;
            Ok(id)
        });
        let caja_id = match checked {
            Ok(id) => id,
            Err(e) => return Err(self.fail("Closing caja", e)),
        };

        let payload = CajaClose { counted_cash, note };
        let closed = match self.api.close_caja(caja_id, &payload).await {
            Ok(closed) => closed,
            Err(e) => return Err(self.fail("Closing caja", e)),
        };

        // The close is persisted from here on; every exit must re-fetch.
        let report = match CloseReport::from_closed(&closed, &self.state.movements) {
            Ok(report) => report,
            Err(e) => {
                let err = ClientError::InvalidResponse(e.message);
                self.invalidate();
                if let Err(refresh_err) = self.refresh().await {
                    tracing::warn!(caja_id, error = %refresh_err, "Refresh after close failed");
                }
                return Err(self.fail("Closing caja", err));
            }
        };
        tracing::info!(
            caja_id,
            expected = %report.expected,
            counted = %report.counted,
            difference = %report.difference,
            "Caja closed"
        );
        self.notifier.notify(Toast::info(format!(
            "Drawer closed, difference {}",
            report.difference
        )));
        self.state.last_close = Some(report.clone());

        self.invalidate();
        self.refresh().await?;
        Ok(report)
    }

    fn open_session(&self) -> ClientResult<&CajaSession> {
        match &self.state.session {
            Some(session) if session.is_open() => Ok(session),
            Some(session) => Err(AppError::with_message(
                ErrorCode::CajaAlreadyClosed,
                format!("caja {} is already closed", session.id),
            )
            .into()),
            None => Err(AppError::new(ErrorCode::CajaNotOpen).into()),
        }
    }

    fn fail(&self, context: &str, err: ClientError) -> ClientError {
        report(self.notifier.as_ref(), context, &err);
        err
    }
}
