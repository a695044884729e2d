//! Staff Model (especialistas, horarios, bloqueos)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commission::CommissionRule;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::time::{SlotTime, day_of_week};

fn default_color() -> String {
    "#9E9E9E".to_string()
}

fn default_true() -> bool {
    true
}

/// Staff member (especialista)
///
/// Fetched once per calendar load and treated as immutable for the rest
/// of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    /// Initials shown on the grid header; derived from `name` when absent
    #[serde(default)]
    pub initials: Option<String>,
    /// Column / card color (CSS hex)
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub schedules: Vec<WeeklySchedule>,
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
    /// Default commission earned on services
    #[serde(default)]
    pub commission: Option<CommissionRule>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl StaffMember {
    /// Initials for display: the stored value, or the first letter of the
    /// first two words of the name
    pub fn display_initials(&self) -> String {
        if let Some(initials) = self.initials.as_deref().map(str::trim)
            && !initials.is_empty()
        {
            return initials.to_uppercase();
        }
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Recurring weekly working window (horario)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub id: Option<i64>,
    pub staff_id: i64,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl WeeklySchedule {
    /// Whether this window is in force on `date`
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.active && self.day_of_week == day_of_week(date)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.day_of_week > 6 {
            return Err(AppError::with_message(
                ErrorCode::ScheduleInvalid,
                format!("day_of_week must be 0..=6, got {}", self.day_of_week),
            ));
        }
        if self.start_time >= self.end_time {
            return Err(AppError::with_message(
                ErrorCode::ScheduleInvalid,
                format!(
                    "schedule starts at {} but ends at {}",
                    self.start_time, self.end_time
                ),
            ));
        }
        Ok(())
    }
}

/// Date-range unavailability (bloqueo): vacation, sick leave, errands
///
/// Without both times the block covers the whole day for every date in
/// range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    #[serde(default)]
    pub id: Option<i64>,
    pub staff_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<SlotTime>,
    #[serde(default)]
    pub end_time: Option<SlotTime>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl TimeBlock {
    /// Inclusive date-only containment
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// The blocked time range, `None` for a whole-day block
    pub fn time_range(&self) -> Option<(SlotTime, SlotTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.time_range().is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.start_date > self.end_date {
            return Err(AppError::with_message(
                ErrorCode::BlockInvalid,
                format!(
                    "block starts on {} but ends on {}",
                    self.start_date, self.end_date
                ),
            ));
        }
        if let Some((start, end)) = self.time_range()
            && start >= end
        {
            return Err(AppError::with_message(
                ErrorCode::BlockInvalid,
                format!("block starts at {} but ends at {}", start, end),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(name: &str, initials: Option<&str>) -> StaffMember {
        StaffMember {
            id: 1,
            name: name.to_string(),
            initials: initials.map(str::to_string),
            color: default_color(),
            schedules: vec![],
            blocks: vec![],
            commission: None,
            is_active: true,
        }
    }

    fn date(s: &str) -> NaiveDate {
        crate::time::parse_date(s).unwrap()
    }

    #[test]
    fn test_display_initials() {
        assert_eq!(staff("Ana María Gómez", None).display_initials(), "AM");
        assert_eq!(staff("lucía", None).display_initials(), "L");
        assert_eq!(staff("Ana Gómez", Some("ag")).display_initials(), "AG");
        assert_eq!(staff("Ana Gómez", Some("  ")).display_initials(), "AG");
    }

    #[test]
    fn test_staff_defaults_from_minimal_json() {
        let member: StaffMember = serde_json::from_str(r#"{"id":7,"name":"Paula"}"#).unwrap();
        assert!(member.is_active);
        assert!(member.schedules.is_empty());
        assert_eq!(member.color, "#9E9E9E");
    }

    #[test]
    fn test_schedule_applies_on_weekday_and_active() {
        let mut schedule = WeeklySchedule {
            id: None,
            staff_id: 1,
            day_of_week: 1,
            start_time: "08:00".parse().unwrap(),
            end_time: "20:00".parse().unwrap(),
            active: true,
        };
        assert!(schedule.applies_on(date("2026-10-19")));
        assert!(!schedule.applies_on(date("2026-10-20")));

        schedule.active = false;
        assert!(!schedule.applies_on(date("2026-10-19")));
    }

    #[test]
    fn test_schedule_validation() {
        let schedule = WeeklySchedule {
            id: None,
            staff_id: 1,
            day_of_week: 7,
            start_time: "08:00".parse().unwrap(),
            end_time: "20:00".parse().unwrap(),
            active: true,
        };
        assert_eq!(
            schedule.validate().unwrap_err().code,
            ErrorCode::ScheduleInvalid
        );

        let inverted = WeeklySchedule {
            day_of_week: 2,
            start_time: "20:00".parse().unwrap(),
            end_time: "08:00".parse().unwrap(),
            ..schedule
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_block_date_range_is_inclusive() {
        let block = TimeBlock {
            id: None,
            staff_id: 1,
            start_date: date("2026-10-19"),
            end_date: date("2026-10-21"),
            start_time: None,
            end_time: None,
            reason: Some("Vacaciones".into()),
        };
        assert!(!block.applies_on(date("2026-10-18")));
        assert!(block.applies_on(date("2026-10-19")));
        assert!(block.applies_on(date("2026-10-21")));
        assert!(!block.applies_on(date("2026-10-22")));
        assert!(block.is_all_day());
    }

    #[test]
    fn test_block_with_half_a_time_range_is_all_day() {
        let block = TimeBlock {
            id: None,
            staff_id: 1,
            start_date: date("2026-10-19"),
            end_date: date("2026-10-19"),
            start_time: Some("12:00".parse().unwrap()),
            end_time: None,
            reason: None,
        };
        assert!(block.is_all_day());
        assert!(block.validate().is_ok());
    }

    #[test]
    fn test_block_deserializes_backend_times() {
        let block: TimeBlock = serde_json::from_str(
            r#"{"staff_id":3,"start_date":"2026-10-19","end_date":"2026-10-19",
                "start_time":"12:00:00","end_time":"13:00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            block.time_range(),
            Some(("12:00".parse().unwrap(), "13:00".parse().unwrap()))
        );
    }
}
