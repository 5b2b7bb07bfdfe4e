//! Vacation account.
//!
//! Converts the annual allowance in days into an hour budget using the
//! employee's current daily target, then subtracts the vacation hours
//! booked in the year.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, VacationAccount};
use crate::store::EntryStore;

use super::resolver::{current_weekly_hours, daily_target};

fn hours_to_days(hours: Decimal, daily_target: Decimal) -> Decimal {
    if daily_target > Decimal::ZERO {
        (hours / daily_target).round_dp(1)
    } else {
        Decimal::ZERO
    }
}

/// Computes the vacation account of `employee` for `year`.
///
/// The budget uses the weekly hours in force on `clock.today()`, not the
/// value in force during `year`.
///
/// # Errors
///
/// Returns `InvalidPeriod` if `year` is outside the calendar range.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::accounting::vacation_account;
/// use timekeeping_engine::clock::FixedClock;
/// use timekeeping_engine::models::Employee;
/// use timekeeping_engine::store::InMemoryStore;
/// use chrono::NaiveDate;
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
/// let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
/// let account = vacation_account(&InMemoryStore::new(), &employee, 2026, &clock).unwrap();
/// assert_eq!(account.budget_hours, Decimal::from(240));
/// ```
pub fn vacation_account<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    year: i32,
    clock: &dyn Clock,
) -> EngineResult<VacationAccount> {
    let (first, last) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(EngineError::InvalidPeriod { year, month: 1 });
        }
    };

    let weekly_hours = current_weekly_hours(store, employee, clock.today())?;
    let daily = daily_target(employee, weekly_hours);

    let budget_hours = (Decimal::from(employee.vacation_days) * daily).round_dp(2);
    let used_hours: Decimal = store
        .absences_between(&employee.id, first, last)?
        .iter()
        .filter(|a| a.is_vacation())
        .map(|a| a.hours)
        .sum();
    let used_hours = used_hours.round_dp(2);
    let remaining_hours = budget_hours - used_hours;

    Ok(VacationAccount {
        year,
        budget_days: employee.vacation_days,
        budget_hours,
        used_hours,
        used_days: hours_to_days(used_hours, daily),
        remaining_hours,
        remaining_days: hours_to_days(remaining_hours, daily),
    })
}
