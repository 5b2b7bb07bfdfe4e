//! Effective-dated weekly hours.
//!
//! An employee's contracted weekly hours change over time. Each change is
//! recorded with the date it takes effect; the value in force on a given
//! date is the latest change on or before that date, falling back to the
//! employee record when no change applies yet.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, WeeklyHoursChange};
use crate::store::EntryStore;

/// Divisor turning weekly hours into a daily target.
///
/// The daily target assumes a five-day week regardless of the employee's
/// `work_days_per_week`.
pub const WORKING_DAYS_PER_WEEK: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// The weekly-hours history of one employee, ordered by effective date.
///
/// # Example
///
/// ```
/// use timekeeping_engine::accounting::WeeklyHoursHistory;
/// use timekeeping_engine::models::WeeklyHoursChange;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let change = WeeklyHoursChange {
///     employee_id: "emp_001".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     weekly_hours: Decimal::from(30),
///     note: None,
/// };
/// let history = WeeklyHoursHistory::new(Decimal::from(40), vec![change]);
///
/// let before = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
/// let after = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// assert_eq!(history.weekly_hours_on(before), Decimal::from(40));
/// assert_eq!(history.weekly_hours_on(after), Decimal::from(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyHoursHistory {
    fallback: Decimal,
    entries: Vec<(NaiveDate, Decimal)>,
}

impl WeeklyHoursHistory {
    /// Builds a history from unordered changes.
    ///
    /// `fallback` is used for dates before the first change.
    pub fn new(fallback: Decimal, changes: Vec<WeeklyHoursChange>) -> Self {
        let mut entries: Vec<(NaiveDate, Decimal)> = changes
            .into_iter()
            .map(|c| (c.effective_from, c.weekly_hours))
            .collect();
        entries.sort_by_key(|(date, _)| *date);
        Self { fallback, entries }
    }

    /// Loads the history of `employee` from the store.
    pub fn load<S: EntryStore + ?Sized>(store: &S, employee: &Employee) -> EngineResult<Self> {
        let changes = store.weekly_hours_changes(&employee.id)?;
        Ok(Self::new(employee.weekly_hours, changes))
    }

    /// Weekly hours in force on `date`.
    pub fn weekly_hours_on(&self, date: NaiveDate) -> Decimal {
        let idx = self.entries.partition_point(|(from, _)| *from <= date);
        match idx {
            0 => self.fallback,
            n => self.entries[n - 1].1,
        }
    }
}

/// Daily target for an employee working `weekly_hours`.
///
/// Zero when the employee's hours are not tracked.
pub fn daily_target(employee: &Employee, weekly_hours: Decimal) -> Decimal {
    if !employee.track_hours {
        return Decimal::ZERO;
    }
    weekly_hours / WORKING_DAYS_PER_WEEK
}

/// Resolves the weekly hours in force for `employee` on `date`.
pub fn effective_weekly_hours<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    date: NaiveDate,
) -> EngineResult<Decimal> {
    Ok(WeeklyHoursHistory::load(store, employee)?.weekly_hours_on(date))
}

/// The weekly hours the employee record should currently carry.
///
/// This is the most recent change effective on or before `today`, so a
/// change scheduled for a future date does not take effect early.
pub fn current_weekly_hours<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    today: NaiveDate,
) -> EngineResult<Decimal> {
    effective_weekly_hours(store, employee, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_employee(weekly_hours: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            weekly_hours: dec(weekly_hours),
            work_days_per_week: 5,
            vacation_days: 30,
            track_hours: true,
            is_night_worker: false,
            exempt_from_regulation: false,
        }
    }

    fn change(date: &str, hours: &str) -> WeeklyHoursChange {
        WeeklyHoursChange {
            employee_id: "emp_001".to_string(),
            effective_from: make_date(date),
            weekly_hours: dec(hours),
            note: None,
        }
    }

    #[test]
    fn test_no_changes_falls_back_to_employee() {
        let history = WeeklyHoursHistory::new(dec("38.5"), vec![]);
        assert_eq!(history.weekly_hours_on(make_date("2026-01-01")), dec("38.5"));
    }

    #[test]
    fn test_latest_change_on_or_before_date_wins() {
        let history = WeeklyHoursHistory::new(
            dec("40"),
            vec![
                change("2026-06-01", "20"),
                change("2026-01-01", "30"),
                change("2026-03-15", "25"),
            ],
        );

        assert_eq!(history.weekly_hours_on(make_date("2025-12-31")), dec("40"));
        assert_eq!(history.weekly_hours_on(make_date("2026-01-01")), dec("30"));
        assert_eq!(history.weekly_hours_on(make_date("2026-03-14")), dec("30"));
        assert_eq!(history.weekly_hours_on(make_date("2026-03-15")), dec("25"));
        assert_eq!(history.weekly_hours_on(make_date("2026-12-31")), dec("20"));
    }

    #[test]
    fn test_daily_target_is_one_fifth() {
        let employee = make_employee("38.5");
        assert_eq!(daily_target(&employee, dec("38.5")), dec("7.7"));
    }

    #[test]
    fn test_daily_target_ignores_work_days_per_week() {
        let mut employee = make_employee("24");
        employee.work_days_per_week = 3;
        assert_eq!(daily_target(&employee, dec("24")), dec("4.8"));
    }

    #[test]
    fn test_untracked_employee_has_zero_target() {
        let mut employee = make_employee("40");
        employee.track_hours = false;
        assert_eq!(daily_target(&employee, dec("40")), Decimal::ZERO);
    }

    #[test]
    fn test_current_weekly_hours_ignores_future_change() {
        let mut store = InMemoryStore::new();
        let employee = make_employee("40");
        store.add_weekly_hours_change(change("2026-01-01", "32")).unwrap();
        store.add_weekly_hours_change(change("2026-09-01", "20")).unwrap();

        let hours = current_weekly_hours(&store, &employee, make_date("2026-05-10")).unwrap();
        assert_eq!(hours, dec("32"));
    }
}
