//! Commission calculator
//!
//! Projected staff earnings for display. Authoritative commission figures
//! are computed and persisted by the backend when an invoice is saved.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::InvoiceLine;

/// How a commission rate is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionType {
    /// Rate is a percentage of the sale amount
    Percentage,
    /// Rate is a flat amount per sale line
    Fixed,
}

/// Commission rule attached to a staff member or service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRule {
    #[serde(rename = "type")]
    pub kind: CommissionType,
    pub rate: Decimal,
}

impl CommissionRule {
    pub fn percentage(rate: impl Into<Decimal>) -> Self {
        Self {
            kind: CommissionType::Percentage,
            rate: rate.into(),
        }
    }

    pub fn fixed(amount: impl Into<Decimal>) -> Self {
        Self {
            kind: CommissionType::Fixed,
            rate: amount.into(),
        }
    }

    /// Reject negative rates and percentages above 100
    pub fn validate(&self) -> AppResult<()> {
        if self.rate.is_sign_negative() && !self.rate.is_zero() {
            return Err(AppError::with_message(
                ErrorCode::InvalidCommission,
                format!("commission rate must be non-negative, got {}", self.rate),
            ));
        }
        if self.kind == CommissionType::Percentage && self.rate > Decimal::ONE_HUNDRED {
            return Err(AppError::with_message(
                ErrorCode::InvalidCommission,
                format!("commission percentage must be at most 100, got {}", self.rate),
            ));
        }
        Ok(())
    }

    /// Commission owed on `base`
    pub fn apply(&self, base: Decimal) -> Decimal {
        calculate(base, self.kind, self.rate)
    }
}

/// `percentage -> round(base * rate / 100)`, `fixed -> rate`
///
/// Rounds half away from zero to whole currency units.
pub fn calculate(base: Decimal, kind: CommissionType, rate: Decimal) -> Decimal {
    match kind {
        CommissionType::Percentage => (base * rate / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        CommissionType::Fixed => rate,
    }
}

/// Projected earnings for one staff member over a set of sale lines
///
/// Lines attributed to other staff are skipped; a line-level rule
/// overrides the staff member's default.
pub fn project_earnings(staff_id: i64, default_rule: &CommissionRule, lines: &[InvoiceLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.staff_id == Some(staff_id))
        .map(|line| {
            let rule = line.commission.as_ref().unwrap_or(default_rule);
            rule.apply(line.base_amount())
        })
        .sum()
}
