//! Cash drawer reconciliation
//!
//! `difference = counted - (opening + cash in - cash out)`.
//!
//! Closing is blind: while the drawer is open the operator only ever sees a
//! [`BlindCloseSheet`], which has no expected total. A [`CloseReport`] can
//! only be built from a session the backend reports as closed.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CajaSession, CashMovement, MovementKind};

/// Reject negative amounts
pub fn validate_amount(field: &str, value: Decimal) -> AppResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::invalid_amount(
            field,
            format!("{} must be non-negative, got {}", field, value),
        ));
    }
    Ok(())
}

/// Cash-only movement totals of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashTotals {
    pub cash_in: Decimal,
    pub cash_out: Decimal,
}

impl CashTotals {
    /// Sum the cash movements of `caja_id`; card and transfer payments
    /// never touch the drawer
    pub fn from_movements(caja_id: i64, movements: &[CashMovement]) -> Self {
        movements
            .iter()
            .filter(|m| m.caja_id == caja_id && m.is_cash())
            .fold(Self::default(), |mut totals, m| {
                match m.kind {
                    MovementKind::In => totals.cash_in += m.amount,
                    MovementKind::Out => totals.cash_out += m.amount,
                }
                totals
            })
    }

    pub fn net(&self) -> Decimal {
        self.cash_in - self.cash_out
    }
}

/// `opening + in - out`
pub fn theoretical_cash(opening: Decimal, totals: CashTotals) -> Decimal {
    opening + totals.net()
}

/// `counted - theoretical`, after validating every input is non-negative
pub fn difference(opening: Decimal, totals: CashTotals, counted: Decimal) -> AppResult<Decimal> {
    validate_amount("opening_float", opening)?;
    validate_amount("cash_in", totals.cash_in)?;
    validate_amount("cash_out", totals.cash_out)?;
    validate_amount("counted_cash", counted)?;
    Ok(counted - theoretical_cash(opening, totals))
}

/// Sign of a close difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Variance {
    Balanced,
    /// More cash than expected
    Over(Decimal),
    /// Less cash than expected
    Short(Decimal),
}

impl Variance {
    pub fn of(difference: Decimal) -> Self {
        if difference.is_zero() {
            Self::Balanced
        } else if difference.is_sign_positive() {
            Self::Over(difference)
        } else {
            Self::Short(-difference)
        }
    }
}

/// What the operator sees before submitting a blind close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlindCloseSheet {
    pub caja_id: i64,
    pub operator_name: String,
    pub opened_at: NaiveDateTime,
    pub opening_float: Decimal,
    pub movement_count: usize,
}

impl BlindCloseSheet {
    pub fn new(session: &CajaSession, movements: &[CashMovement]) -> AppResult<Self> {
        if !session.is_open() {
            return Err(AppError::with_message(
                ErrorCode::CajaAlreadyClosed,
                format!("caja {} is already closed", session.id),
            ));
        }
        Ok(Self {
            caja_id: session.id,
            operator_name: session.operator_name.clone(),
            opened_at: session.opened_at,
            opening_float: session.opening_float,
            movement_count: movements.iter().filter(|m| m.caja_id == session.id).count(),
        })
    }
}

/// The reveal shown after a close has been persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseReport {
    pub caja_id: i64,
    pub closed_at: Option<NaiveDateTime>,
    pub opening_float: Decimal,
    pub cash_in: Decimal,
    pub cash_out: Decimal,
    pub expected: Decimal,
    pub counted: Decimal,
    pub difference: Decimal,
    pub variance: Variance,
}

impl CloseReport {
    /// Build the reveal from the backend's close response
    ///
    /// Figures the backend returned win over the local calculation; a
    /// disagreement is logged.
    pub fn from_closed(session: &CajaSession, movements: &[CashMovement]) -> AppResult<Self> {
        if session.is_open() {
            return Err(AppError::with_message(
                ErrorCode::CajaNotOpen,
                format!("caja {} has not been closed", session.id),
            ));
        }
        let counted = session.counted_cash.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidResponse,
                format!("closed caja {} carries no counted cash", session.id),
            )
        })?;

        let totals = CashTotals::from_movements(session.id, movements);
        let local_expected = theoretical_cash(session.opening_float, totals);
        let local_difference = difference(session.opening_float, totals, counted)?;

        let expected = session.expected_cash.unwrap_or(local_expected);
        let difference = session.difference.unwrap_or(local_difference);
        if difference != local_difference || expected != local_expected {
            tracing::warn!(
                caja_id = session.id,
                %expected,
                %local_expected,
                %difference,
                %local_difference,
                "Backend close figures disagree with local movements"
            );
        }

        Ok(Self {
            caja_id: session.id,
            closed_at: session.closed_at,
            opening_float: session.opening_float,
            cash_in: totals.cash_in,
            cash_out: totals.cash_out,
            expected,
            counted,
            difference,
            variance: Variance::of(difference),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CajaStatus, PaymentMethod};

    fn ts() -> NaiveDateTime {
        crate::time::parse_date("2024-06-03")
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn movement(kind: MovementKind, amount: i64, method: PaymentMethod) -> CashMovement {
        CashMovement {
            id: 0,
            caja_id: 1,
            kind,
            amount: Decimal::from(amount),
            concept: "venta".into(),
            payment_method: method,
            invoice_id: None,
            created_at: ts(),
        }
    }

    fn session(status: CajaStatus) -> CajaSession {
        CajaSession {
            id: 1,
            operator_id: 3,
            operator_name: "Marta".into(),
            status,
            opened_at: ts(),
            closed_at: None,
            opening_float: Decimal::from(50000),
            counted_cash: None,
            expected_cash: None,
            difference: None,
            note: None,
        }
    }

    fn sample_movements() -> Vec<CashMovement> {
        vec![
            movement(MovementKind::In, 30000, PaymentMethod::Cash),
            movement(MovementKind::In, 45000, PaymentMethod::Card),
            movement(MovementKind::Out, 10000, PaymentMethod::Cash),
        ]
    }

    #[test]
    fn test_totals_ignore_non_cash() {
        let totals = CashTotals::from_movements(1, &sample_movements());
        assert_eq!(totals.cash_in, Decimal::from(30000));
        assert_eq!(totals.cash_out, Decimal::from(10000));
    }

    #[test]
    fn test_sheet_and_report_skip_other_sessions() {
        let mut movements = sample_movements();
        let mut stray = movement(MovementKind::In, 99000, PaymentMethod::Cash);
        stray.caja_id = 2;
        movements.push(stray);

        let sheet = BlindCloseSheet::new(&session(CajaStatus::Open), &movements).unwrap();
        assert_eq!(sheet.movement_count, 3);

        let mut closed = session(CajaStatus::Closed);
        closed.counted_cash = Some(Decimal::from(70000));
        let report = CloseReport::from_closed(&closed, &movements).unwrap();
        assert_eq!(report.cash_in, Decimal::from(30000));
        assert_eq!(report.variance, Variance::Balanced);
    }

    #[test]
    fn test_difference_formula() {
        let totals = CashTotals {
            cash_in: Decimal::from(30000),
            cash_out: Decimal::from(10000),
        };
        let opening = Decimal::from(50000);
        assert_eq!(theoretical_cash(opening, totals), Decimal::from(70000));
        assert_eq!(
            difference(opening, totals, Decimal::from(70000)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            difference(opening, totals, Decimal::from(68500)).unwrap(),
            Decimal::from(-1500)
        );
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let err = difference(Decimal::from(-1), CashTotals::default(), Decimal::ZERO).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(
            err.details.unwrap().get("field").and_then(|v| v.as_str()),
            Some("opening_float")
        );
    }

    #[test]
    fn test_variance() {
        assert_eq!(Variance::of(Decimal::ZERO), Variance::Balanced);
        assert_eq!(Variance::of(Decimal::from(200)), Variance::Over(Decimal::from(200)));
        assert_eq!(Variance::of(Decimal::from(-200)), Variance::Short(Decimal::from(200)));
    }

    #[test]
    fn test_blind_sheet_only_for_open_drawer() {
        let sheet = BlindCloseSheet::new(&session(CajaStatus::Open), &sample_movements()).unwrap();
        assert_eq!(sheet.movement_count, 3);

        let json = serde_json::to_value(&sheet).unwrap();
        assert!(json.get("expected").is_none());

        let err = BlindCloseSheet::new(&session(CajaStatus::Closed), &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::CajaAlreadyClosed);
    }

    #[test]
    fn test_report_requires_closed_session() {
        let err = CloseReport::from_closed(&session(CajaStatus::Open), &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::CajaNotOpen);
    }

    #[test]
    fn test_report_computes_locally_when_backend_omits_figures() {
        let mut closed = session(CajaStatus::Closed);
        closed.counted_cash = Some(Decimal::from(71000));

        let report = CloseReport::from_closed(&closed, &sample_movements()).unwrap();
        assert_eq!(report.expected, Decimal::from(70000));
        assert_eq!(report.difference, Decimal::from(1000));
        assert_eq!(report.variance, Variance::Over(Decimal::from(1000)));
    }

    #[test]
    fn test_report_prefers_backend_figures() {
        let mut closed = session(CajaStatus::Closed);
        closed.counted_cash = Some(Decimal::from(70000));
        closed.expected_cash = Some(Decimal::from(72000));
        closed.difference = Some(Decimal::from(-2000));

        let report = CloseReport::from_closed(&closed, &sample_movements()).unwrap();
        assert_eq!(report.expected, Decimal::from(72000));
        assert_eq!(report.variance, Variance::Short(Decimal::from(2000)));
    }
}
