//! Aggregate views over timesheet entries
//!
//! These are derived on read and never stored.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::timesheet::{month_name, month_number, DayType, TimesheetEntry};

/// Vacation/sick counts and the sum of hours over working days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTotals {
    pub total_vacation_leaves: u32,
    pub total_sick_leaves: u32,
    pub total_working_hours: u64,
}

impl LeaveTotals {
    pub fn record(&mut self, entry: &TimesheetEntry) {
        match entry.day_type {
            DayType::Vacation => self.total_vacation_leaves += 1,
            DayType::Sick => self.total_sick_leaves += 1,
            DayType::Working => self.total_working_hours += u64::from(entry.working_hours),
        }
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TimesheetEntry>,
    {
        let mut totals = Self::default();
        for entry in entries {
            totals.record(entry);
        }
        totals
    }
}

/// One populated month of a year view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    #[serde(flatten)]
    pub totals: LeaveTotals,
    /// Ordered by date ascending
    pub days: Vec<TimesheetEntry>,
}

/// Month buckets keyed by month number, serialized as a
/// `{"January": {...}, ...}` object in calendar order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthBuckets(BTreeMap<u32, MonthSummary>);

impl MonthBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, month: u32) -> &mut MonthSummary {
        self.0.entry(month).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&MonthSummary> {
        month_number(name).and_then(|m| self.0.get(&m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Month name and summary, in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MonthSummary)> {
        self.0
            .iter()
            .filter_map(|(m, summary)| month_name(*m).map(|name| (name, summary)))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut MonthSummary> {
        self.0.values_mut()
    }
}

impl Serialize for MonthBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, summary) in self.iter() {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthBuckets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BucketsVisitor;

        impl<'de> Visitor<'de> for BucketsVisitor {
            type Value = MonthBuckets;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of month names to month summaries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut buckets = BTreeMap::new();
                while let Some((name, summary)) = access.next_entry::<String, MonthSummary>()? {
                    let month = month_number(&name)
                        .ok_or_else(|| de::Error::custom(format!("unknown month '{}'", name)))?;
                    buckets.insert(month, summary);
                }
                Ok(MonthBuckets(buckets))
            }
        }

        deserializer.deserialize_map(BucketsVisitor)
    }
}

/// Year view for one cost id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTimesheet {
    pub year: i32,
    #[serde(flatten)]
    pub totals: LeaveTotals,
    pub months: MonthBuckets,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationSummary {
    pub total_entries: usize,
    #[serde(flatten)]
    pub totals: LeaveTotals,
}

/// Result of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTimesheet {
    pub summary: CreationSummary,
    pub days: Vec<TimesheetEntry>,
}

impl CreatedTimesheet {
    pub fn from_entries(days: Vec<TimesheetEntry>) -> Self {
        let summary = CreationSummary {
            total_entries: days.len(),
            totals: LeaveTotals::from_entries(&days),
        };
        Self { summary, days }
    }
}
