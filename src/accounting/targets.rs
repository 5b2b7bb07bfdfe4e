//! Monthly target, actual and balance.
//!
//! The target for a month is the sum of daily targets over the days the
//! employee was expected to work: weekdays that are neither a public
//! holiday nor covered by an absence. Each day uses the weekly hours in
//! force on that day, so a mid-month contract change splits the month.
//!
//! The actual hours are the net hours of every closed shift dated in the
//! month. Shifts still clocked in contribute nothing.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, MonthlySummary, YearMonth, is_weekend};
use crate::store::EntryStore;

use super::resolver::{WeeklyHoursHistory, daily_target};

/// Computes the expected hours for `employee` in `period`.
///
/// # Returns
///
/// The target rounded to two decimals, or zero if the employee's hours are
/// not tracked.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::accounting::monthly_target;
/// use timekeeping_engine::models::{Employee, YearMonth};
/// use timekeeping_engine::store::InMemoryStore;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     weekly_hours: Decimal::from(40),
///     work_days_per_week: 5,
///     vacation_days: 30,
///     track_hours: true,
///     is_night_worker: false,
///     exempt_from_regulation: false,
/// };
/// let store = InMemoryStore::new();
///
/// // February 2026 has 20 weekdays.
/// let target = monthly_target(&store, &employee, YearMonth::new(2026, 2).unwrap()).unwrap();
/// assert_eq!(target, Decimal::from(160));
/// ```
pub fn monthly_target<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    period: YearMonth,
) -> EngineResult<Decimal> {
    let history = WeeklyHoursHistory::load(store, employee)?;
    target_with_history(store, employee, &history, period)
}

/// Sums the net hours of the closed shifts of `employee` in `period`.
pub fn monthly_actual<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    period: YearMonth,
) -> EngineResult<Decimal> {
    let shifts = store.shifts_between(&employee.id, period.first_day(), period.last_day())?;
    let total: Decimal = shifts.iter().filter_map(|s| s.net_hours()).sum();
    Ok(total.round_dp(2))
}

/// Actual minus target for `period`; positive is overtime.
pub fn monthly_balance<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    period: YearMonth,
) -> EngineResult<Decimal> {
    Ok(monthly_summary(store, employee, period)?.balance)
}

/// Target, actual and balance for `period` in one call.
pub fn monthly_summary<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    period: YearMonth,
) -> EngineResult<MonthlySummary> {
    let history = WeeklyHoursHistory::load(store, employee)?;
    summary_with_history(store, employee, &history, period)
}

/// Shared by the ledger so a multi-month walk loads the history only once.
pub(crate) fn summary_with_history<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    history: &WeeklyHoursHistory,
    period: YearMonth,
) -> EngineResult<MonthlySummary> {
    let target_hours = target_with_history(store, employee, history, period)?;
    let actual_hours = monthly_actual(store, employee, period)?;
    Ok(MonthlySummary {
        period,
        target_hours,
        actual_hours,
        balance: (actual_hours - target_hours).round_dp(2),
    })
}

fn target_with_history<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    history: &WeeklyHoursHistory,
    period: YearMonth,
) -> EngineResult<Decimal> {
    if !employee.track_hours {
        return Ok(Decimal::ZERO);
    }

    let (first, last) = (period.first_day(), period.last_day());
    let holidays: BTreeSet<NaiveDate> = store
        .holidays_between(first, last)?
        .into_iter()
        .map(|h| h.date)
        .collect();
    let absent: BTreeSet<NaiveDate> = store
        .absences_between(&employee.id, first, last)?
        .into_iter()
        .map(|a| a.date)
        .collect();

    let total: Decimal = period
        .days()
        .filter(|day| !is_weekend(*day) && !holidays.contains(day) && !absent.contains(day))
        .map(|day| daily_target(employee, history.weekly_hours_on(day)))
        .sum();

    Ok(total.round_dp(2))
}
