//! Draft days entered on the command line
//!
//! A day is written `DATE:TYPE[:HOURS]`, e.g. `2024-03-01:working:8` or
//! `2024-03-04:sick`. Working days without hours default to 8. Hours on sick
//! and vacation days are cleared before submission.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use ts_models::DayType;
use uuid::Uuid;

pub const DEFAULT_WORKING_HOURS: u32 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("expected DATE:TYPE[:HOURS], got '{0}'")]
    Shape(String),
    #[error("'{0}' is not a YYYY-MM-DD date")]
    Date(String),
    #[error("unknown day type '{0}', expected working, sick or vacation")]
    DayType(String),
    #[error("'{0}' is not a whole number of hours")]
    Hours(String),
}

/// One day as entered, before hours are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftDay {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub working_hours: Option<u32>,
}

impl DraftDay {
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let mut parts = input.trim().splitn(3, ':');
        let (date, day_type) = match (parts.next(), parts.next()) {
            (Some(date), Some(day_type)) if !date.is_empty() => (date, day_type),
            _ => return Err(FormError::Shape(input.to_string())),
        };

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::Date(date.to_string()))?;
        let day_type = day_type
            .parse::<DayType>()
            .map_err(|_| FormError::DayType(day_type.to_string()))?;
        let working_hours = parts
            .next()
            .map(|h| h.parse::<u32>().map_err(|_| FormError::Hours(h.to_string())))
            .transpose()?;

        Ok(Self { date, day_type, working_hours })
    }

    /// Hours as submitted: cleared on leave days, defaulted on working days
    pub fn submitted_hours(&self) -> u32 {
        match self.day_type {
            DayType::Working => self.working_hours.unwrap_or(DEFAULT_WORKING_HOURS),
            DayType::Sick | DayType::Vacation => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPayload {
    pub date: String,
    pub day_type: DayType,
    pub working_hours: u32,
}

/// Create request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub cost_id: String,
    pub days: Vec<DayPayload>,
}

impl Submission {
    /// Build a submission under a fresh cost id
    pub fn new(days: &[DraftDay]) -> Self {
        Self::with_cost_id(Uuid::new_v4().to_string(), days)
    }

    pub fn with_cost_id(cost_id: String, days: &[DraftDay]) -> Self {
        let days = days
            .iter()
            .map(|day| DayPayload {
                date: day.date.format("%Y-%m-%d").to_string(),
                day_type: day.day_type,
                working_hours: day.submitted_hours(),
            })
            .collect();
        Self { cost_id, days }
    }
}

/// Bulk update item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub date: String,
    pub day_type: DayType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_id: Option<String>,
}

impl UpdatePayload {
    /// Leave days always carry zero hours; working days keep what was given
    pub fn new(date: NaiveDate, day_type: DayType, hours: Option<u32>, cost_id: Option<String>) -> Self {
        let working_hours = match day_type {
            DayType::Working => hours,
            DayType::Sick | DayType::Vacation => Some(0),
        };
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            day_type,
            working_hours,
            cost_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_day() {
        let day = DraftDay::parse("2024-03-01:working:6").unwrap();
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(day.day_type, DayType::Working);
        assert_eq!(day.working_hours, Some(6));

        let day = DraftDay::parse("2024-03-04:sick").unwrap();
        assert_eq!(day.working_hours, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(DraftDay::parse("2024-03-01"), Err(FormError::Shape(_))));
        assert!(matches!(DraftDay::parse("03/01/2024:working"), Err(FormError::Date(_))));
        assert!(matches!(DraftDay::parse("2024-03-01:holiday"), Err(FormError::DayType(_))));
        assert!(matches!(DraftDay::parse("2024-03-01:working:-2"), Err(FormError::Hours(_))));
    }

    #[test]
    fn test_hours_cleared_on_leave_days() {
        let days = [
            DraftDay::parse("2024-03-01:working").unwrap(),
            DraftDay::parse("2024-03-04:vacation:8").unwrap(),
            DraftDay::parse("2024-03-05:sick:3").unwrap(),
        ];
        let submission = Submission::with_cost_id("cost".into(), &days);

        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "costId": "cost",
                "days": [
                    {"date": "2024-03-01", "dayType": "working", "workingHours": 8},
                    {"date": "2024-03-04", "dayType": "vacation", "workingHours": 0},
                    {"date": "2024-03-05", "dayType": "sick", "workingHours": 0}
                ]
            })
        );
    }

    #[test]
    fn test_fresh_cost_id_per_submission() {
        let days = [DraftDay::parse("2024-03-01:working").unwrap()];
        let first = Submission::new(&days);
        let second = Submission::new(&days);

        assert_ne!(first.cost_id, second.cost_id);
        assert_eq!(Uuid::parse_str(&first.cost_id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_update_payload() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let payload = UpdatePayload::new(date, DayType::Vacation, Some(4), None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"date": "2024-03-01", "dayType": "vacation", "workingHours": 0})
        );

        let payload = UpdatePayload::new(date, DayType::Working, None, Some("cost".into()));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"date": "2024-03-01", "dayType": "working", "costId": "cost"})
        );
    }
}
