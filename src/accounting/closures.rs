//! Company closures.
//!
//! A closure books a vacation day for every employee on every working day
//! in its range. Deleting the closure removes exactly the days it booked;
//! vacation the employee had already taken on those days is left alone.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Absence, AbsenceType, CompanyClosure, Employee};
use crate::store::EntryStore;

use super::absences::bookable_days;
use super::reports::FALLBACK_DAILY_HOURS;
use super::resolver::{WeeklyHoursHistory, daily_target};

/// The result of booking a company closure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureBooking {
    /// The stored closure.
    pub closure: CompanyClosure,
    /// The vacation days created, grouped by employee in id order.
    pub absences: Vec<Absence>,
    /// Employees that received at least one vacation day.
    pub affected_employees: usize,
}

/// Creates a company closure over `[start, end]` and books vacation for
/// every known employee.
///
/// Each booked day consumes the employee's daily target in force on that
/// day, or [`FALLBACK_DAILY_HOURS`] when the target is zero. Days on which
/// the employee already has vacation are skipped.
///
/// # Errors
///
/// Returns `InvalidAbsence` if the range is inverted or holds no working
/// day. Nothing is written in that case.
pub fn book_company_closure<S: EntryStore + ?Sized>(
    store: &mut S,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<ClosureBooking> {
    let invalid = |message: &str| EngineError::InvalidAbsence {
        start,
        end,
        message: message.to_string(),
    };
    if end < start {
        return Err(invalid("end date is before start date"));
    }

    let days = bookable_days(&*store, start, end)?;
    if days.is_empty() {
        return Err(invalid("no working days in the closure"));
    }

    let closure = CompanyClosure {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        start_date: start,
        end_date: end,
    };
    store.insert_closure(closure.clone())?;

    let mut absences = Vec::new();
    let mut affected_employees = 0;
    for employee in store.employees()? {
        let booked = closure_days_for(&*store, &employee, &closure, &days)?;
        if booked.is_empty() {
            continue;
        }
        affected_employees += 1;
        for absence in booked {
            store.insert_absence(absence.clone())?;
            absences.push(absence);
        }
    }

    info!(
        closure_id = %closure.id,
        days = days.len(),
        employees = affected_employees,
        "Booked company closure"
    );

    Ok(ClosureBooking {
        closure,
        absences,
        affected_employees,
    })
}

/// Deletes a company closure and the vacation days it booked.
///
/// # Errors
///
/// Returns `NotFound` if no closure has the id `closure_id`.
pub fn remove_company_closure<S: EntryStore + ?Sized>(
    store: &mut S,
    closure_id: &str,
) -> EngineResult<Vec<Absence>> {
    let removed = store.remove_closure(closure_id)?;
    info!(closure_id, days = removed.len(), "Removed company closure");
    Ok(removed)
}

fn closure_days_for<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    closure: &CompanyClosure,
    days: &[NaiveDate],
) -> EngineResult<Vec<Absence>> {
    let on_vacation: BTreeSet<NaiveDate> = store
        .absences_between(&employee.id, closure.start_date, closure.end_date)?
        .into_iter()
        .filter(Absence::is_vacation)
        .map(|a| a.date)
        .collect();
    let history = WeeklyHoursHistory::load(store, employee)?;

    Ok(days
        .iter()
        .filter(|d| !on_vacation.contains(*d))
        .map(|&date| {
            let mut hours = daily_target(employee, history.weekly_hours_on(date));
            if hours <= Decimal::ZERO {
                hours = FALLBACK_DAILY_HOURS;
            }
            Absence {
                id: Uuid::new_v4().to_string(),
                employee_id: employee.id.clone(),
                date,
                end_date: Some(closure.end_date),
                absence_type: AbsenceType::Vacation,
                hours,
                note: Some(closure.absence_note()),
                closure_id: Some(closure.id.clone()),
            }
        })
        .collect())
}
