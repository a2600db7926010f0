//! Day rules shared by the create and update contracts

use ts_models::DayType;

/// Raw day data for validation
pub trait TimesheetDayData: Send + Sync {
    fn date(&self) -> Option<&str>;
    fn day_type(&self) -> Option<&str>;
    fn working_hours(&self) -> Option<i64>;
}

/// A broken day-type/working-hours rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRuleViolation {
    SickWithHours,
    VacationWithHours,
    WorkingWithoutHours,
    NegativeHours,
    TooManyHours { max: u32 },
}

/// Check a day type against an hour count.
///
/// Checks run in a fixed order so the reported violation is stable:
/// leave days with hours, working days without hours, negative hours,
/// then the daily ceiling.
pub fn check_day_rules(day_type: DayType, hours: i64, max_hours: u32) -> Result<(), DayRuleViolation> {
    match day_type {
        DayType::Sick if hours > 0 => return Err(DayRuleViolation::SickWithHours),
        DayType::Vacation if hours > 0 => return Err(DayRuleViolation::VacationWithHours),
        DayType::Working if hours == 0 => return Err(DayRuleViolation::WorkingWithoutHours),
        _ => {}
    }
    if hours < 0 {
        return Err(DayRuleViolation::NegativeHours);
    }
    if hours > i64::from(max_hours) {
        return Err(DayRuleViolation::TooManyHours { max: max_hours });
    }
    Ok(())
}
