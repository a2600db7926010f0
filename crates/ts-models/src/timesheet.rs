//! Timesheet entry model
//!
//! Table: timesheets

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Calendar month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// 1-based month number of a month name
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Classification of a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Working,
    Sick,
    Vacation,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Working, DayType::Sick, DayType::Vacation];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Working => "working",
            DayType::Sick => "sick",
            DayType::Vacation => "vacation",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day type '{0}' (expected working, sick or vacation)")]
pub struct ParseDayTypeError(pub String);

impl FromStr for DayType {
    type Err = ParseDayTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working" => Ok(DayType::Working),
            "sick" => Ok(DayType::Sick),
            "vacation" => Ok(DayType::Vacation),
            other => Err(ParseDayTypeError(other.to_string())),
        }
    }
}

/// A persisted timesheet entry
///
/// Serialized with the field names existing clients read:
/// `{id, costId, date, day_type, workingHours}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub id: Uuid,
    #[serde(rename = "costId")]
    pub cost_id: String,
    pub date: NaiveDate,
    pub day_type: DayType,
    #[serde(rename = "workingHours")]
    pub working_hours: u32,
}

impl TimesheetEntry {
    pub fn new(cost_id: impl Into<String>, day: &NewTimesheetDay) -> Self {
        Self {
            id: Uuid::new_v4(),
            cost_id: cost_id.into(),
            date: day.date,
            day_type: day.day_type,
            working_hours: day.working_hours,
        }
    }

    /// 1-based month of the entry date
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// A validated day ready to be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTimesheetDay {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub working_hours: u32,
}

/// A validated change to the entry identified by `date`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayUpdate {
    pub date: NaiveDate,
    /// Narrows the lookup when dates are unique per cost id
    pub cost_id: Option<String>,
    pub day_type: DayType,
    pub working_hours: u32,
}
