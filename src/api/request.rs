//! Request types for the timekeeping API.
//!
//! Every endpoint is stateless: the request body carries a [`Snapshot`] of
//! one employee's records, which the handler loads into an
//! [`InMemoryStore`] before running the engine.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Absence, AbsenceType, Employee, Holiday, Shift, ShiftDraft, WeeklyHoursChange,
};
use crate::store::{EntryStore, InMemoryStore};

/// One employee's records at the time of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// The employee the request is about.
    pub employee: Employee,
    /// Recorded shifts.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
    /// Recorded absences, one per day.
    #[serde(default)]
    pub absences: Vec<AbsenceRequest>,
    /// Public holidays.
    #[serde(default)]
    pub holidays: Vec<HolidayRequest>,
    /// Effective-dated weekly hours changes.
    #[serde(default)]
    pub weekly_hours_changes: Vec<WeeklyHoursChangeRequest>,
    /// Overrides the server's current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// A stored shift in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start_time: NaiveTime,
    /// Clock-out time; absent while the shift is open.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Declared break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Justification for Sunday or holiday work.
    #[serde(default)]
    pub exception_reason: Option<String>,
}

/// A stored single-day absence in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// The day of absence.
    pub date: NaiveDate,
    /// The kind of absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    /// Hours credited for the day.
    pub hours: Decimal,
}

/// A public holiday in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// A weekly hours change in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursChangeRequest {
    /// First day the new value applies.
    pub effective_from: NaiveDate,
    /// Contractual weekly hours from that day on.
    pub weekly_hours: Decimal,
}

/// Body for `POST /accounts/monthly` and `POST /accounts/overtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRequest {
    /// The employee's records.
    pub snapshot: Snapshot,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 to 12.
    pub month: u32,
}

/// Body for `POST /accounts/vacation` and `POST /reports/compensatory-rest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRequest {
    /// The employee's records.
    pub snapshot: Snapshot,
    /// Calendar year.
    pub year: i32,
}

/// Body for `POST /reports/rest-periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestPeriodRequest {
    /// The employee's records.
    pub snapshot: Snapshot,
    /// Calendar year.
    pub year: i32,
    /// Restricts the audit to one month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Overrides the configured minimum rest.
    #[serde(default)]
    pub min_rest_hours: Option<Decimal>,
}

/// Body for `POST /shifts/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCheckRequest {
    /// The employee's records.
    pub snapshot: Snapshot,
    /// The shift to check.
    pub shift: ShiftDraft,
    /// Id of the stored shift this one would replace.
    #[serde(default)]
    pub shift_id: Option<String>,
}

impl Snapshot {
    /// Validates the employee and loads every record into a fresh store.
    ///
    /// Duplicate shifts, absences or holidays in the snapshot are reported
    /// as `DuplicateEntry`. A closed shift whose end is not after its start
    /// is reported as `InvalidShift`.
    pub fn into_store(self) -> EngineResult<(Employee, InMemoryStore)> {
        self.employee.validate()?;

        let mut store = InMemoryStore::new();
        let employee_id = self.employee.id.clone();
        store.upsert_employee(self.employee.clone());

        for shift in self.shifts {
            shift.validate()?;
            store.insert_shift(shift.into_shift(&employee_id))?;
        }
        for absence in self.absences {
            store.insert_absence(absence.into_absence(&employee_id))?;
        }
        for holiday in self.holidays {
            store.add_holiday(holiday.into())?;
        }
        for change in self.weekly_hours_changes {
            store.add_weekly_hours_change(WeeklyHoursChange {
                employee_id: employee_id.clone(),
                effective_from: change.effective_from,
                weekly_hours: change.weekly_hours,
                note: None,
            })?;
        }

        Ok((self.employee, store))
    }
}

impl ShiftRequest {
    fn validate(&self) -> EngineResult<()> {
        match self.end_time {
            Some(end) if end <= self.start_time => Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!("end time {} must be after start time {}", end, self.start_time),
            }),
            _ => Ok(()),
        }
    }

    fn into_shift(self, employee_id: &str) -> Shift {
        ShiftDraft {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            break_minutes: self.break_minutes,
            note: None,
            exception_reason: self.exception_reason,
        }
        .into_shift(self.id, employee_id)
    }
}

impl AbsenceRequest {
    fn into_absence(self, employee_id: &str) -> Absence {
        Absence {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date: self.date,
            end_date: None,
            absence_type: self.absence_type,
            hours: self.hours,
            note: None,
            closure_id: None,
        }
    }
}

impl From<HolidayRequest> for Holiday {
    fn from(req: HolidayRequest) -> Self {
        Holiday::new(req.date, req.name)
    }
}
