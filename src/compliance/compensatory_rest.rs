//! Compensatory rest after Sunday and holiday work.
//!
//! Every worked Sunday must be followed by a free weekday (Monday to
//! Saturday) within two weeks, and every worked public holiday by one
//! within eight weeks. A day is free when the employee has no shift on it.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::debug;

use crate::config::RulesConfig;
use crate::error::EngineResult;
use crate::models::{
    CompensatoryRestKind, CompensatoryRestReport, CompensatoryRestViolation, Employee, YearMonth,
};
use crate::store::EntryStore;

/// Searches `(worked, worked + window_days]` for a free Monday-to-Saturday.
pub fn has_free_day(
    worked: NaiveDate,
    window_days: i64,
    worked_dates: &BTreeSet<NaiveDate>,
) -> bool {
    worked
        .iter_days()
        .skip(1)
        .take(usize::try_from(window_days).unwrap_or(0))
        .any(|day| day.weekday() != Weekday::Sun && !worked_dates.contains(&day))
}

/// Audits compensatory rest for the Sundays and holidays `employee` worked
/// in `year`.
///
/// A worked Sunday that is also a holiday is audited as a Sunday. Windows
/// of days late in the year extend into the next year, and shifts recorded
/// there are taken into account.
pub fn compensatory_rest_report<S: EntryStore + ?Sized>(
    store: &S,
    rules: &RulesConfig,
    employee: &Employee,
    year: i32,
) -> EngineResult<CompensatoryRestReport> {
    let first = YearMonth::new(year, 1)?.first_day();
    let last = YearMonth::new(year, 12)?.last_day();

    if employee.exempt_from_regulation {
        return Ok(CompensatoryRestReport {
            employee_id: employee.id.clone(),
            year,
            checked_days: 0,
            violations: Vec::new(),
            compliant: true,
        });
    }

    let windows = &rules.compensatory_rest;
    let horizon = u64::try_from(windows.longest_window_days()).unwrap_or(0);
    let query_end = last.checked_add_days(Days::new(horizon)).unwrap_or(last);

    let worked_dates: BTreeSet<NaiveDate> = store
        .shifts_between(&employee.id, first, query_end)?
        .into_iter()
        .map(|s| s.date)
        .collect();
    let holidays: BTreeSet<NaiveDate> = store
        .holidays_between(first, last)?
        .into_iter()
        .map(|h| h.date)
        .collect();

    let tagged: Vec<(NaiveDate, CompensatoryRestKind, i64)> = worked_dates
        .range(first..=last)
        .filter_map(|date| {
            if date.weekday() == Weekday::Sun {
                Some((*date, CompensatoryRestKind::Sunday, windows.sunday_window_days))
            } else if holidays.contains(date) {
                Some((*date, CompensatoryRestKind::Holiday, windows.holiday_window_days))
            } else {
                None
            }
        })
        .collect();

    let violations: Vec<CompensatoryRestViolation> = tagged
        .iter()
        .filter(|(date, _, window)| !has_free_day(*date, *window, &worked_dates))
        .map(|(date, kind, window)| CompensatoryRestViolation {
            date: *date,
            kind: *kind,
            window_days: *window,
        })
        .collect();

    debug!(
        employee_id = %employee.id,
        year,
        checked = tagged.len(),
        violations = violations.len(),
        "Audited compensatory rest"
    );

    Ok(CompensatoryRestReport {
        employee_id: employee.id.clone(),
        year,
        checked_days: tagged.len(),
        compliant: violations.is_empty(),
        violations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holiday, Shift};
    use crate::store::InMemoryStore;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            weekly_hours: Decimal::from(40),
            work_days_per_week: 5,
            vacation_days: 30,
            track_hours: true,
            is_night_worker: false,
            exempt_from_regulation: false,
        }
    }

    fn work(store: &mut InMemoryStore, date: NaiveDate) {
        store
            .insert_shift(Shift {
                id: format!("shift_{}", date),
                employee_id: "emp_001".to_string(),
                date,
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0),
                break_minutes: 0,
                note: None,
                exception_reason: None,
            })
            .unwrap();
    }

    fn work_range(store: &mut InMemoryStore, from: &str, to: &str) {
        let to = make_date(to);
        for day in make_date(from).iter_days().take_while(|d| *d <= to) {
            work(store, day);
        }
    }

    #[test]
    fn test_sunday_without_free_day_is_violation() {
        let mut store = InMemoryStore::new();
        // Sunday 2026-03-01 followed by 14 worked days
        work_range(&mut store, "2026-03-01", "2026-03-15");

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        assert!(!report.compliant);
        assert_eq!(report.violations[0].date, make_date("2026-03-01"));
        assert_eq!(report.violations[0].kind, CompensatoryRestKind::Sunday);
        assert_eq!(report.violations[0].window_days, 14);
    }

    #[test]
    fn test_one_free_day_compensates() {
        let mut store = InMemoryStore::new();
        work_range(&mut store, "2026-03-01", "2026-03-09");
        // 2026-03-10 free
        work_range(&mut store, "2026-03-11", "2026-03-15");

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        // Sundays 03-08 and 03-15 are audited as well
        let dates: Vec<NaiveDate> = report.violations.iter().map(|v| v.date).collect();
        assert!(!dates.contains(&make_date("2026-03-01")));
        assert!(!dates.contains(&make_date("2026-03-08")));
        assert_eq!(report.checked_days, 3);
    }

    #[test]
    fn test_free_sunday_does_not_compensate() {
        let worked: BTreeSet<NaiveDate> = make_date("2026-03-02")
            .iter_days()
            .take(13)
            .filter(|d| d.weekday() != Weekday::Sun)
            .collect();
        // Only the following Sunday 2026-03-08 is free
        assert!(!has_free_day(make_date("2026-03-01"), 13, &worked));
    }

    #[test]
    fn test_holiday_uses_eight_week_window() {
        let mut store = InMemoryStore::new();
        store
            .add_holiday(Holiday::new(make_date("2026-05-01"), "Labour Day"))
            .unwrap();
        // Worked the holiday and every Mon-Sat for 55 days after it
        work(&mut store, make_date("2026-05-01"));
        for day in make_date("2026-05-02").iter_days().take(55) {
            if day.weekday() != Weekday::Sun {
                work(&mut store, day);
            }
        }

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        let holiday = report
            .violations
            .iter()
            .find(|v| v.kind == CompensatoryRestKind::Holiday);
        assert!(holiday.is_none(), "day 56 is free and inside the window");

        work(&mut store, make_date("2026-06-26"));
        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        let holiday = report
            .violations
            .iter()
            .find(|v| v.kind == CompensatoryRestKind::Holiday)
            .unwrap();
        assert_eq!(holiday.window_days, 56);
    }

    #[test]
    fn test_sunday_holiday_is_audited_as_sunday() {
        let mut store = InMemoryStore::new();
        store
            .add_holiday(Holiday::new(make_date("2026-03-01"), "Sunday feast"))
            .unwrap();
        work(&mut store, make_date("2026-03-01"));

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        assert_eq!(report.checked_days, 1);
        assert!(report.compliant);
    }

    #[test]
    fn test_december_window_sees_next_year() {
        let mut store = InMemoryStore::new();
        // Sunday 2026-12-27, then every day through 2027-01-10
        work_range(&mut store, "2026-12-27", "2027-01-10");

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].date, make_date("2026-12-27"));

        // A free 2027-01-04 compensates it
        let mut store = InMemoryStore::new();
        work_range(&mut store, "2026-12-27", "2027-01-03");
        work_range(&mut store, "2027-01-05", "2027-01-10");
        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &make_employee(), 2026)
                .unwrap();
        assert!(report.compliant);
    }

    #[test]
    fn test_exempt_employee_is_compliant() {
        let mut store = InMemoryStore::new();
        work_range(&mut store, "2026-03-01", "2026-03-15");
        let mut employee = make_employee();
        employee.exempt_from_regulation = true;

        let report =
            compensatory_rest_report(&store, &RulesConfig::default(), &employee, 2026).unwrap();
        assert!(report.compliant);
        assert_eq!(report.checked_days, 0);
    }
}
