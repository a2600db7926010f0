//! Plain-text rendering of timesheet views

use std::fmt::Write;

use ts_models::{CreatedTimesheet, LeaveTotals, TimesheetEntry, YearTimesheet};

fn stat_cards(out: &mut String, totals: &LeaveTotals) {
    let cards = [
        ("Vacation Days", u64::from(totals.total_vacation_leaves)),
        ("Sick Days", u64::from(totals.total_sick_leaves)),
        ("Working Hours", totals.total_working_hours),
    ];
    for (label, value) in cards {
        let _ = writeln!(out, "  {:<14} {:>6}", label, value);
    }
}

fn day_table(out: &mut String, days: &[TimesheetEntry]) {
    let _ = writeln!(out, "  {:<12} {:<10} {:>5}", "Date", "Type", "Hours");
    let _ = writeln!(out, "  {}", "-".repeat(29));
    for day in days {
        let _ = writeln!(
            out,
            "  {:<12} {:<10} {:>5}",
            day.date.format("%Y-%m-%d"),
            day.day_type,
            day.working_hours
        );
    }
}

/// Year-level stat cards followed by one table per populated month
pub fn render_year(view: &YearTimesheet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Timesheet {}", view.year);
    stat_cards(&mut out, &view.totals);

    for (name, month) in view.months.iter() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}  (vacation {}, sick {}, hours {})",
            name,
            month.totals.total_vacation_leaves,
            month.totals.total_sick_leaves,
            month.totals.total_working_hours
        );
        day_table(&mut out, &month.days);
    }
    out
}

pub fn render_created(created: &CreatedTimesheet, cost_id: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cost ID: {}", cost_id);
    let _ = writeln!(out, "  {:<14} {:>6}", "Entries", created.summary.total_entries);
    stat_cards(&mut out, &created.summary.totals);
    out
}

pub fn render_entries(entries: &[TimesheetEntry]) -> String {
    let mut out = String::new();
    day_table(&mut out, entries);
    out
}
