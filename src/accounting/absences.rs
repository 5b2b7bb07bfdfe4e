//! Absence booking.
//!
//! A booking covers a single date or an inclusive date range. Ranges are
//! expanded into one record per working day: Saturdays, Sundays and public
//! holidays inside the range are skipped.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Absence, AbsenceType, Employee, WarningCode, WorkingTimeWarning, is_weekend,
};
use crate::store::EntryStore;

use super::vacation::vacation_account;

/// A request to book an absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// First day of the absence.
    pub date: NaiveDate,
    /// Last day of the absence, inclusive. `None` books a single day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Kind of absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    /// Hours consumed per booked day.
    pub hours: Decimal,
    /// Free-text note copied to every record.
    #[serde(default)]
    pub note: Option<String>,
}

/// The records created by a booking plus any non-blocking warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceBooking {
    /// One record per booked working day, in date order.
    pub absences: Vec<Absence>,
    /// Warnings raised while booking.
    pub warnings: Vec<WorkingTimeWarning>,
}

/// Working days in `[start, end]`: weekdays that are not public holidays.
pub fn bookable_days<S: EntryStore + ?Sized>(
    store: &S,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<NaiveDate>> {
    let holidays: BTreeSet<NaiveDate> = store
        .holidays_between(start, end)?
        .into_iter()
        .map(|h| h.date)
        .collect();
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !is_weekend(*d) && !holidays.contains(d))
        .collect())
}

/// Books an absence for `employee`.
///
/// All days are checked before any record is written, so a booking either
/// creates every day or none.
///
/// # Errors
///
/// - `InvalidAbsence` if the range is inverted, the hours are negative, or
///   the range contains no working day
/// - `DuplicateEntry` if an absence of the same type already exists on one
///   of the days
///
/// Overdrawing the vacation account is not an error; the booking succeeds
/// with a `VACATION_BUDGET_EXCEEDED` warning.
pub fn book_absence<S: EntryStore + ?Sized>(
    store: &mut S,
    employee: &Employee,
    request: AbsenceRequest,
    clock: &dyn Clock,
) -> EngineResult<AbsenceBooking> {
    let start = request.date;
    let end = request.end_date.unwrap_or(start);
    let invalid = |message: &str| EngineError::InvalidAbsence {
        start,
        end,
        message: message.to_string(),
    };

    if end < start {
        return Err(invalid("end date is before start date"));
    }
    if request.hours < Decimal::ZERO {
        return Err(invalid("hours per day must not be negative"));
    }

    let days = bookable_days(&*store, start, end)?;
    if days.is_empty() {
        return Err(invalid("no working days in the requested range"));
    }

    let taken: BTreeSet<NaiveDate> = store
        .absences_between(&employee.id, start, end)?
        .into_iter()
        .filter(|a| a.absence_type == request.absence_type)
        .map(|a| a.date)
        .collect();
    if let Some(day) = days.iter().find(|d| taken.contains(d)) {
        return Err(EngineError::DuplicateEntry {
            entity: "absence".to_string(),
            key: format!("{}/{}", employee.id, day),
        });
    }

    let mut warnings = Vec::new();
    if request.absence_type == AbsenceType::Vacation {
        let account = vacation_account(&*store, employee, start.year(), clock)?;
        let needed = request.hours * Decimal::from(days.len() as u64);
        let remaining = account.remaining_hours - needed;
        if remaining < Decimal::ZERO {
            warn!(
                employee_id = %employee.id,
                remaining = %remaining,
                "Vacation booking exceeds the remaining budget"
            );
            warnings.push(WorkingTimeWarning::new(
                WarningCode::VacationBudgetExceeded,
                format!(
                    "Booking {}h leaves {}h of vacation in {}",
                    needed, remaining, account.year
                ),
            ));
        }
    }

    let stored_end = request.end_date;
    let mut absences = Vec::with_capacity(days.len());
    for date in days {
        let absence = Absence {
            id: Uuid::new_v4().to_string(),
            employee_id: employee.id.clone(),
            date,
            end_date: stored_end,
            absence_type: request.absence_type,
            hours: request.hours,
            note: request.note.clone(),
            closure_id: None,
        };
        store.insert_absence(absence.clone())?;
        absences.push(absence);
    }

    info!(
        employee_id = %employee.id,
        days = absences.len(),
        absence_type = ?request.absence_type,
        "Booked absence"
    );

    Ok(AbsenceBooking { absences, warnings })
}
