//! Plain-text rendering of calendar and cash drawer views

use shared::grid::{CellState, DayGrid};
use shared::models::{Appointment, Role};
use shared::reconciliation::{BlindCloseSheet, CloseReport, Variance};
use shared::SlotTime;

const COLUMN_WIDTH: usize = 8;

/// One line per slot row, one column per staff member
///
/// `.` bookable, `#` blocked, blank unavailable; rows covered by an
/// appointment show the card's first letters.
pub fn grid(grid: &DayGrid) -> String {
    let mut out = format!("{:<6}", grid.date.format("%a").to_string());
    for column in &grid.columns {
        out.push_str(&format!("|{:^width$}", column.initials, width = COLUMN_WIDTH));
    }
    out.push('\n');

    for &row in &grid.rows {
        out.push_str(&format!("{:<6}", row.to_string()));
        for column in &grid.columns {
            let card = column.cards.iter().find(|c| c.start <= row && row < c.end);
            let text = match (card, column.cell(row).map(|c| c.state)) {
                (Some(card), _) if card.start == row => truncate(&card.title, COLUMN_WIDTH),
                (Some(_), _) => "  ||".to_string(),
                (None, Some(CellState::Bookable)) => ".".to_string(),
                (None, Some(CellState::Blocked)) => "#".to_string(),
                (None, _) => String::new(),
            };
            out.push_str(&format!("|{:<width$}", text, width = COLUMN_WIDTH));
        }
        out.push('\n');
    }
    out
}

pub fn appointment_line(appointment: &Appointment) -> String {
    format!(
        "#{:<5} {} {:>3}min  staff {:<3} {:<14} {:<20} {}",
        appointment.id,
        SlotTime::of(&appointment.start_time),
        appointment.duration_minutes,
        appointment.staff_id,
        appointment.state.label(),
        appointment.client_name.as_deref().unwrap_or("-"),
        appointment.service_name.as_deref().unwrap_or(""),
    )
}

pub fn blind_sheet(sheet: &BlindCloseSheet) -> String {
    format!(
        "Caja #{} open since {} by {}\nOpening float: {}\nMovements: {}\nCount the drawer and run `caja close --counted <amount>`.",
        sheet.caja_id,
        sheet.opened_at.format("%Y-%m-%d %H:%M"),
        sheet.operator_name,
        sheet.opening_float,
        sheet.movement_count,
    )
}

pub fn close_report(report: &CloseReport) -> String {
    let verdict = match report.variance {
        Variance::Balanced => "balanced".to_string(),
        Variance::Over(amount) => format!("over by {}", amount),
        Variance::Short(amount) => format!("short by {}", amount),
    };
    format!(
        "Caja #{} closed\nOpening float: {}\nCash in:       {}\nCash out:      {}\nExpected:      {}\nCounted:       {}\nDifference:    {} ({})",
        report.caja_id,
        report.opening_float,
        report.cash_in,
        report.cash_out,
        report.expected,
        report.counted,
        report.difference,
        verdict,
    )
}

pub fn role_line(role: &Role) -> String {
    let flag = if role.is_active { "" } else { " (inactive)" };
    format!("{:<16}{} {}", role.name, flag, role.permissions.join(", "))
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_grid_marks_cells_and_cards() {
        use shared::grid::{GridConfig, layout};
        use shared::models::{AppointmentState, StaffMember, WeeklySchedule};

        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let t = |s: &str| s.parse::<SlotTime>().unwrap();
        let staff = vec![StaffMember {
            id: 1,
            name: "Ana Gómez".into(),
            initials: None,
            color: "#3F51B5".into(),
            schedules: vec![WeeklySchedule {
                id: None,
                staff_id: 1,
                day_of_week: 1,
                start_time: t("08:00"),
                end_time: t("20:00"),
                active: true,
            }],
            blocks: vec![],
            commission: None,
            is_active: true,
        }];
        let appointments = vec![Appointment {
            id: 1,
            client_id: 7,
            client_name: Some("Lucía".into()),
            staff_id: 1,
            service_id: 1,
            service_name: None,
            start_time: t("09:00").on(date),
            duration_minutes: 30,
            state: AppointmentState::Scheduled,
            notes: None,
        }];
        let availability = shared::availability::compute_day(&staff, date);
        let day = layout(date, &staff, &appointments, &availability, GridConfig::default());

        let text = grid(&day);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 65);
        assert!(lines[0].contains("AG"));
        assert_eq!(lines[1].trim_end(), "06:00 |");
        assert!(lines[9].starts_with("08:00 |."));
        assert!(lines[13].starts_with("09:00 |Lucía"));
        assert!(lines[14].starts_with("09:15 |  ||"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Mónica Álvarez", 6), "Mónica");
    }

    #[test]
    fn test_close_report_shows_verdict() {
        let report = CloseReport {
            caja_id: 4,
            closed_at: None,
            opening_float: Decimal::from(50000),
            cash_in: Decimal::from(30000),
            cash_out: Decimal::from(10000),
            expected: Decimal::from(70000),
            counted: Decimal::from(68500),
            difference: Decimal::from(-1500),
            variance: Variance::Short(Decimal::from(1500)),
        };
        let text = close_report(&report);
        assert!(text.contains("Expected:      70000"));
        assert!(text.contains("short by 1500"));
    }

    #[test]
    fn test_blind_sheet_has_no_expected_line() {
        let sheet = BlindCloseSheet {
            caja_id: 4,
            operator_name: "Marta".into(),
            opened_at: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            opening_float: Decimal::from(50000),
            movement_count: 2,
        };
        let text = blind_sheet(&sheet);
        assert!(text.contains("Opening float: 50000"));
        assert!(!text.contains("Expected"));
    }
}
