//! Create contract for timesheet days

use serde_json::json;
use ts_core::error::TsError;
use ts_models::{DayType, NewTimesheetDay};

use crate::base::{validate_date, Contract, ValidationResult};
use super::base::{check_day_rules, DayRuleViolation, TimesheetDayData};

/// Contract for one day of a create request
#[derive(Debug, Clone, Copy)]
pub struct CreateDayContract {
    max_working_hours: u32,
}

impl CreateDayContract {
    pub fn new(max_working_hours: u32) -> Self {
        Self { max_working_hours }
    }

    fn validate_day_type(&self, raw: Option<&str>, date: Option<&str>) -> ValidationResult<DayType> {
        raw.unwrap_or_default().parse::<DayType>().map_err(|_| {
            TsError::validation(
                "Invalid day type",
                json!({
                    "error": "Day Type Validation Failed",
                    "date": date,
                    "providedValue": raw,
                    "expectedValues": ["working", "sick", "vacation"],
                    "help": "Each day must have a dayType of working, sick or vacation.",
                }),
            )
        })
    }

    fn validate_hours_present(&self, hours: Option<i64>, date: Option<&str>) -> ValidationResult<i64> {
        hours.ok_or_else(|| {
            TsError::validation(
                "Missing working hours",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "help": "Every day needs workingHours. Use 0 for sick leave and vacation days.",
                }),
            )
        })
    }

    fn rule_error(&self, violation: DayRuleViolation, date: Option<&str>, day_type: DayType, hours: i64) -> TsError {
        match violation {
            DayRuleViolation::SickWithHours => TsError::validation(
                "Invalid working hours for sick leave",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "dayType": day_type,
                    "providedHours": hours,
                    "expectedHours": 0,
                    "help": "Sick leave days must have 0 working hours. Please set workingHours to 0 for all sick leave entries.",
                }),
            ),
            DayRuleViolation::VacationWithHours => TsError::validation(
                "Invalid working hours for vacation",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "dayType": day_type,
                    "providedHours": hours,
                    "expectedHours": 0,
                    "help": "Vacation days must have 0 working hours. Please set workingHours to 0 for all vacation entries.",
                }),
            ),
            DayRuleViolation::WorkingWithoutHours => TsError::validation(
                "Invalid working hours for working day",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "dayType": day_type,
                    "providedHours": hours,
                    "minimumExpectedHours": 1,
                    "help": "Working days must have working hours greater than 0. Please provide valid working hours for working days.",
                }),
            ),
            DayRuleViolation::NegativeHours => TsError::validation(
                "Negative working hours not allowed",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "providedHours": hours,
                    "help": "Working hours cannot be negative. Please provide 0 or positive values only.",
                }),
            ),
            DayRuleViolation::TooManyHours { max } => TsError::validation(
                "Working hours exceed the daily maximum",
                json!({
                    "error": "Working Hours Validation Failed",
                    "date": date,
                    "providedHours": hours,
                    "maximumExpectedHours": max,
                    "help": format!("A single day cannot have more than {} working hours.", max),
                }),
            ),
        }
    }
}

impl<T: TimesheetDayData> Contract<T> for CreateDayContract {
    type Output = NewTimesheetDay;

    fn validate(&self, day: &T) -> ValidationResult<NewTimesheetDay> {
        let date = validate_date(day.date())?;
        let day_type = self.validate_day_type(day.day_type(), day.date())?;
        let hours = self.validate_hours_present(day.working_hours(), day.date())?;

        check_day_rules(day_type, hours, self.max_working_hours)
            .map_err(|violation| self.rule_error(violation, day.date(), day_type, hours))?;

        Ok(NewTimesheetDay {
            date,
            day_type,
            working_hours: hours as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct MockDay {
        date: Option<&'static str>,
        day_type: Option<&'static str>,
        hours: Option<i64>,
    }

    impl TimesheetDayData for MockDay {
        fn date(&self) -> Option<&str> { self.date }
        fn day_type(&self) -> Option<&str> { self.day_type }
        fn working_hours(&self) -> Option<i64> { self.hours }
    }

    fn day(date: &'static str, day_type: &'static str, hours: i64) -> MockDay {
        MockDay { date: Some(date), day_type: Some(day_type), hours: Some(hours) }
    }

    #[test]
    fn test_valid_working_day() {
        let contract = CreateDayContract::new(24);
        let validated = contract.validate(&day("2024-03-01", "working", 8)).unwrap();

        assert_eq!(validated.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(validated.day_type, DayType::Working);
        assert_eq!(validated.working_hours, 8);
    }

    #[test]
    fn test_sick_day_with_hours() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-03-01", "sick", 4)).unwrap_err();
        let body = err.body();

        assert_eq!(body.message, "Invalid working hours for sick leave");
        assert_eq!(body.detail("providedHours"), Some(&json!(4)));
        assert_eq!(body.detail("expectedHours"), Some(&json!(0)));
        assert_eq!(body.detail("dayType"), Some(&json!("sick")));
    }

    #[test]
    fn test_vacation_day_with_hours() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-03-01", "vacation", 3)).unwrap_err();
        assert_eq!(err.body().message, "Invalid working hours for vacation");
    }

    #[test]
    fn test_working_day_without_hours() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-03-01", "working", 0)).unwrap_err();
        assert_eq!(err.body().message, "Invalid working hours for working day");
    }

    #[test]
    fn test_negative_hours() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-03-01", "working", -2)).unwrap_err();
        assert_eq!(err.body().message, "Negative working hours not allowed");
    }

    #[test]
    fn test_date_checked_before_hours() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-13-01", "sick", 4)).unwrap_err();
        assert_eq!(err.body().message, "Invalid date format");
    }

    #[test]
    fn test_unknown_day_type() {
        let contract = CreateDayContract::new(24);
        let err = contract.validate(&day("2024-03-01", "holiday", 0)).unwrap_err();
        assert_eq!(err.body().message, "Invalid day type");
    }

    #[test]
    fn test_missing_hours() {
        let contract = CreateDayContract::new(24);
        let missing = MockDay { date: Some("2024-03-01"), day_type: Some("sick"), hours: None };
        assert!(contract.validate(&missing).is_err());
    }

    #[test]
    fn test_ceiling_is_configurable() {
        assert!(CreateDayContract::new(24).validate(&day("2024-03-01", "working", 12)).is_ok());
        assert!(CreateDayContract::new(10).validate(&day("2024-03-01", "working", 12)).is_err());
    }
}
