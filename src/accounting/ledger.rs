//! Cumulative overtime ledger.
//!
//! The overtime account is the running sum of monthly balances from the
//! month of the employee's first recorded shift. Nothing is cached: each
//! call recomputes every month from the store.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Employee, LedgerEntry, OvertimeAccount, YearMonth};
use crate::store::EntryStore;

use super::resolver::WeeklyHoursHistory;
use super::targets::summary_with_history;

/// Months from the first-shift month through `up_to`, or `None` if the
/// employee has no shift on or before `up_to`.
fn ledger_months<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    up_to: YearMonth,
) -> EngineResult<Option<(YearMonth, YearMonth)>> {
    let Some(first_date) = store.first_shift_date(&employee.id)? else {
        return Ok(None);
    };
    let start = YearMonth::of(first_date);
    if start > up_to {
        return Ok(None);
    }
    Ok(Some((start, up_to)))
}

/// Cumulative balance of `employee` through `up_to`, inclusive.
///
/// # Returns
///
/// Zero when the employee has never recorded a shift; otherwise the sum of
/// the monthly balances from the first-shift month to `up_to`.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::accounting::overtime_account;
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
/// let balance = overtime_account(&store, &employee, YearMonth::new(2026, 3).unwrap()).unwrap();
/// assert_eq!(balance, Decimal::ZERO);
/// ```
pub fn overtime_account<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    up_to: YearMonth,
) -> EngineResult<Decimal> {
    let Some((start, end)) = ledger_months(store, employee, up_to)? else {
        return Ok(Decimal::ZERO);
    };

    let history = WeeklyHoursHistory::load(store, employee)?;
    let mut total = Decimal::ZERO;
    let mut period = start;
    while period <= end {
        total += summary_with_history(store, employee, &history, period)?.balance;
        period = period.next();
    }

    debug!(
        employee_id = %employee.id,
        up_to = %up_to,
        balance = %total,
        "Computed overtime account"
    );
    Ok(total.round_dp(2))
}

/// Month-by-month overtime ledger of `employee` through `up_to`.
///
/// Each entry carries the running sum through its month, so the last
/// entry's `cumulative` equals [`overtime_account`] for `up_to`.
pub fn overtime_history<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    up_to: YearMonth,
) -> EngineResult<OvertimeAccount> {
    let mut history = Vec::new();
    let mut cumulative = Decimal::ZERO;

    if let Some((start, end)) = ledger_months(store, employee, up_to)? {
        let weekly_hours = WeeklyHoursHistory::load(store, employee)?;
        let mut period = start;
        while period <= end {
            let summary = summary_with_history(store, employee, &weekly_hours, period)?;
            cumulative += summary.balance;
            history.push(LedgerEntry {
                period,
                target_hours: summary.target_hours,
                actual_hours: summary.actual_hours,
                balance: summary.balance,
                cumulative,
            });
            period = period.next();
        }
    }

    Ok(OvertimeAccount {
        up_to,
        current_balance: cumulative,
        history,
    })
}
