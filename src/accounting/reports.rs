//! Team and absence reports.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AbsenceType, Employee, EmployeeMonthlyReport, YearMonth, YearlyAbsenceSummary,
};
use crate::store::EntryStore;

use super::ledger::overtime_account;
use super::resolver::{WeeklyHoursHistory, daily_target};
use super::targets::summary_with_history;

/// Daily hours used to convert absence hours into days when the employee
/// has no daily target.
pub const FALLBACK_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// One report line per known employee for `period`, ordered by id.
pub fn monthly_team_report<S: EntryStore + ?Sized>(
    store: &S,
    period: YearMonth,
) -> EngineResult<Vec<EmployeeMonthlyReport>> {
    let employees = store.employees()?;
    let mut reports = Vec::with_capacity(employees.len());

    for employee in &employees {
        let history = WeeklyHoursHistory::load(store, employee)?;
        let summary = summary_with_history(store, employee, &history, period)?;
        let absences =
            store.absences_between(&employee.id, period.first_day(), period.last_day())?;
        let hours_of = |absence_type: AbsenceType| -> Decimal {
            absences
                .iter()
                .filter(|a| a.absence_type == absence_type)
                .map(|a| a.hours)
                .sum::<Decimal>()
                .round_dp(2)
        };

        reports.push(EmployeeMonthlyReport {
            employee_id: employee.id.clone(),
            weekly_hours: history.weekly_hours_on(period.last_day()),
            target_hours: summary.target_hours,
            actual_hours: summary.actual_hours,
            balance: summary.balance,
            overtime_cumulative: overtime_account(store, employee, period)?,
            vacation_hours: hours_of(AbsenceType::Vacation),
            sick_hours: hours_of(AbsenceType::Sick),
        });
    }

    debug!(period = %period, employees = reports.len(), "Built monthly team report");
    Ok(reports)
}

/// Absence days per type for `employee` in `year`.
///
/// Hours are converted with the employee's current daily target, or
/// [`FALLBACK_DAILY_HOURS`] when that target is zero.
pub fn yearly_absence_summary<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    year: i32,
) -> EngineResult<YearlyAbsenceSummary> {
    let first = YearMonth::new(year, 1)?.first_day();
    let last = YearMonth::new(year, 12)?.last_day();

    let mut daily = daily_target(employee, employee.weekly_hours);
    if daily <= Decimal::ZERO {
        daily = FALLBACK_DAILY_HOURS;
    }

    let absences = store.absences_between(&employee.id, first, last)?;
    let days_of = |absence_type: AbsenceType| -> Decimal {
        let hours: Decimal = absences
            .iter()
            .filter(|a| a.absence_type == absence_type)
            .map(|a| a.hours)
            .sum();
        (hours / daily).round_dp(1)
    };

    let vacation_days = days_of(AbsenceType::Vacation);
    let sick_days = days_of(AbsenceType::Sick);
    let training_days = days_of(AbsenceType::Training);
    let other_days = days_of(AbsenceType::Other);

    Ok(YearlyAbsenceSummary {
        employee_id: employee.id.clone(),
        year,
        vacation_days,
        sick_days,
        training_days,
        other_days,
        total_days: vacation_days + sick_days + training_days + other_days,
    })
}
