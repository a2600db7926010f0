//! Update contract for timesheet days
//!
//! A bulk update item is checked twice. The proposed values are checked on
//! their own before the stored entry is looked up, so an invalid item is
//! reported as invalid even when its date has no entry. Once the entry is
//! known, the merged day type and hours are checked again so that partial
//! updates cannot leave an entry breaking the day rules.

use chrono::NaiveDate;
use ts_core::error::TsError;
use ts_models::{DayType, DayUpdate, TimesheetEntry};

use crate::base::{validate_date, Contract, ValidationResult};
use super::base::{check_day_rules, DayRuleViolation, TimesheetDayData};

/// Update values that passed the standalone checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedUpdate {
    pub date: NaiveDate,
    pub day_type: Option<DayType>,
    pub working_hours: Option<u32>,
}

/// Contract for one item of a bulk update
#[derive(Debug, Clone, Copy)]
pub struct UpdateDayContract {
    max_working_hours: u32,
}

impl UpdateDayContract {
    pub fn new(max_working_hours: u32) -> Self {
        Self { max_working_hours }
    }

    /// Merge a proposed update with the stored entry and check the result
    pub fn resolve(
        &self,
        proposed: &ProposedUpdate,
        existing: &TimesheetEntry,
        cost_id: Option<String>,
    ) -> ValidationResult<DayUpdate> {
        let day_type = proposed.day_type.unwrap_or(existing.day_type);
        let hours = proposed.working_hours.unwrap_or(existing.working_hours);

        check_day_rules(day_type, i64::from(hours), self.max_working_hours)
            .map_err(|violation| self.rule_error(violation, proposed.date))?;

        Ok(DayUpdate {
            date: proposed.date,
            cost_id,
            day_type,
            working_hours: hours,
        })
    }

    fn rule_error(&self, violation: DayRuleViolation, date: NaiveDate) -> TsError {
        let (reason, details) = match violation {
            DayRuleViolation::SickWithHours => (
                "Sick leave cannot have working hours.".to_string(),
                "When updating to sick leave, please set working hours to 0.".to_string(),
            ),
            DayRuleViolation::VacationWithHours => (
                "Vacation days cannot have working hours.".to_string(),
                "When updating to vacation, please set working hours to 0.".to_string(),
            ),
            DayRuleViolation::WorkingWithoutHours => (
                "Working days must have working hours.".to_string(),
                "When updating to a working day, please specify working hours greater than 0.".to_string(),
            ),
            DayRuleViolation::NegativeHours => (
                "Working hours cannot be negative.".to_string(),
                "Please provide 0 or positive values only.".to_string(),
            ),
            DayRuleViolation::TooManyHours { max } => (
                format!("Working hours cannot exceed {}.", max),
                format!("Please provide at most {} working hours per day.", max),
            ),
        };
        TsError::validation(
            format!("Cannot update timesheet for {}: {}", date.format("%Y-%m-%d"), reason),
            details,
        )
    }
}

impl<T: TimesheetDayData> Contract<T> for UpdateDayContract {
    type Output = ProposedUpdate;

    fn validate(&self, item: &T) -> ValidationResult<ProposedUpdate> {
        let date = validate_date(item.date())?;

        let day_type = match item.day_type() {
            Some(raw) => Some(raw.parse::<DayType>().map_err(|_| {
                TsError::validation(
                    format!("Cannot update timesheet for {}: Unknown day type '{}'.", date, raw),
                    "Day type must be one of working, sick or vacation.",
                )
            })?),
            None => None,
        };

        let hours = item.working_hours();
        match (day_type, hours) {
            (Some(day_type), Some(hours)) => {
                check_day_rules(day_type, hours, self.max_working_hours)
                    .map_err(|violation| self.rule_error(violation, date))?;
            }
            (None, Some(hours)) if hours < 0 => {
                return Err(self.rule_error(DayRuleViolation::NegativeHours, date));
            }
            (None, Some(hours)) if hours > i64::from(self.max_working_hours) => {
                return Err(self.rule_error(
                    DayRuleViolation::TooManyHours { max: self.max_working_hours },
                    date,
                ));
            }
            _ => {}
        }

        Ok(ProposedUpdate {
            date,
            day_type,
            working_hours: hours.map(|h| h as u32),
        })
    }
}
