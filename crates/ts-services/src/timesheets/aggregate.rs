//! Year view aggregation

use ts_models::{LeaveTotals, MonthBuckets, TimesheetEntry, YearTimesheet};

/// Partition a year's entries into month buckets with their totals.
///
/// Only months holding at least one entry get a bucket. Days inside a
/// bucket are sorted by date; the sort is stable so entries sharing a date
/// keep their incoming order.
pub fn build_year_view(year: i32, entries: Vec<TimesheetEntry>) -> YearTimesheet {
    let totals = LeaveTotals::from_entries(&entries);
    let mut months = MonthBuckets::new();

    for entry in entries {
        let bucket = months.entry(entry.month());
        bucket.totals.record(&entry);
        bucket.days.push(entry);
    }

    for bucket in months.values_mut() {
        bucket.days.sort_by_key(|day| day.date);
    }

    YearTimesheet { year, totals, months }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ts_models::{DayType, NewTimesheetDay};

    fn entry(m: u32, d: u32, day_type: DayType, hours: u32) -> TimesheetEntry {
        TimesheetEntry::new(
            "cost",
            &NewTimesheetDay {
                date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
                day_type,
                working_hours: hours,
            },
        )
    }

    #[test]
    fn test_groups_by_month_and_sorts_days() {
        let view = build_year_view(
            2024,
            vec![
                entry(3, 15, DayType::Working, 6),
                entry(1, 2, DayType::Vacation, 0),
                entry(3, 1, DayType::Working, 8),
                entry(3, 4, DayType::Sick, 0),
            ],
        );

        assert_eq!(view.year, 2024);
        assert_eq!(view.totals.total_working_hours, 14);
        assert_eq!(view.totals.total_vacation_leaves, 1);
        assert_eq!(view.totals.total_sick_leaves, 1);
        assert_eq!(view.months.len(), 2);

        let march = view.months.get("March").unwrap();
        let dates: Vec<String> = march.days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-04", "2024-03-15"]);
        assert_eq!(march.totals.total_working_hours, 14);
        assert_eq!(march.totals.total_sick_leaves, 1);
        assert!(view.months.get("February").is_none());
    }

    #[test]
    fn test_month_totals_add_up_to_year_totals() {
        let view = build_year_view(
            2024,
            vec![
                entry(2, 1, DayType::Working, 7),
                entry(6, 1, DayType::Working, 5),
                entry(12, 24, DayType::Vacation, 0),
            ],
        );

        let hours: u64 = view.months.iter().map(|(_, m)| m.totals.total_working_hours).sum();
        let vacations: u32 = view.months.iter().map(|(_, m)| m.totals.total_vacation_leaves).sum();
        assert_eq!(hours, view.totals.total_working_hours);
        assert_eq!(vacations, view.totals.total_vacation_leaves);

        let names: Vec<&str> = view.months.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["February", "June", "December"]);
    }
}
