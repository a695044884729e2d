//! Invoice Model (factura lines)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::commission::CommissionRule;

fn default_quantity() -> u32 {
    1
}

/// A sale line of an invoice, optionally attributed to a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    #[serde(default)]
    pub service_id: Option<i64>,
    pub unit_price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Staff member who performed the service
    #[serde(default)]
    pub staff_id: Option<i64>,
    /// Service-specific commission, overrides the staff default
    #[serde(default)]
    pub commission: Option<CommissionRule>,
}

impl InvoiceLine {
    /// Commission base: unit price × quantity
    pub fn base_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
