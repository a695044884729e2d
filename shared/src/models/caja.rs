//! Cash Drawer Model (caja)

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cash drawer session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CajaStatus {
    #[serde(rename = "OPEN", alias = "open", alias = "abierta")]
    Open,
    #[serde(rename = "CLOSED", alias = "closed", alias = "cerrada")]
    Closed,
}

impl Default for CajaStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Cash drawer session - opened and closed once per working period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CajaSession {
    pub id: i64,
    /// Operator employee ID
    pub operator_id: i64,
    /// Operator display name
    pub operator_name: String,
    #[serde(default)]
    pub status: CajaStatus,
    pub opened_at: NaiveDateTime,
    /// Null while the session is open
    #[serde(default)]
    pub closed_at: Option<NaiveDateTime>,
    /// Starting cash in the drawer
    pub opening_float: Decimal,
    /// Cash counted by the operator at close
    #[serde(default)]
    pub counted_cash: Option<Decimal>,
    /// Theoretical closing cash, only disclosed once closed
    #[serde(default)]
    pub expected_cash: Option<Decimal>,
    /// counted - expected, only disclosed once closed
    #[serde(default)]
    pub difference: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CajaSession {
    pub fn is_open(&self) -> bool {
        self.status == CajaStatus::Open
    }
}

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    #[serde(alias = "ingreso")]
    In,
    #[serde(alias = "egreso")]
    Out,
}

/// Payment method of a movement; only cash touches the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "tarjeta")]
    Card,
    #[serde(alias = "transferencia")]
    Transfer,
    #[serde(alias = "otro")]
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

/// A recorded cash-in or cash-out on a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    pub id: i64,
    pub caja_id: i64,
    pub kind: MovementKind,
    pub amount: Decimal,
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Invoice that produced this movement, if any
    #[serde(default)]
    pub invoice_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl CashMovement {
    pub fn is_cash(&self) -> bool {
        self.payment_method == PaymentMethod::Cash
    }
}

/// Open caja payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CajaOpen {
    pub operator_id: i64,
    pub operator_name: String,
    /// Starting cash amount
    pub opening_float: Decimal,
    pub note: Option<String>,
}

/// Register movement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovementCreate {
    pub kind: MovementKind,
    pub amount: Decimal,
    pub concept: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Blind close payload: only what the operator counted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CajaClose {
    pub counted_cash: Decimal,
    pub note: Option<String>,
}
