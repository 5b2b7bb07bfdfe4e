//! In-memory entry store.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Absence, CompanyClosure, Employee, Holiday, Shift, WeeklyHoursChange};

use super::EntryStore;

/// A store keeping every record in memory.
///
/// Enforces the same uniqueness rules as the durable schema:
/// - one shift per (employee, date, start time)
/// - one absence per (employee, date, type)
/// - one holiday per date
/// - one weekly-hours change per (employee, effective_from)
///
/// # Example
///
/// ```
/// use timekeeping_engine::store::{EntryStore, InMemoryStore};
/// use timekeeping_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let mut store = InMemoryStore::new();
/// let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// store.add_holiday(Holiday::new(day, "New Year")).unwrap();
/// assert_eq!(store.holidays_between(day, day).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    employees: BTreeMap<String, Employee>,
    shifts: BTreeMap<String, Shift>,
    absences: Vec<Absence>,
    holidays: BTreeMap<NaiveDate, Holiday>,
    weekly_hours_changes: Vec<WeeklyHoursChange>,
    closures: BTreeMap<String, CompanyClosure>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee record.
    pub fn upsert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Adds a public holiday.
    pub fn add_holiday(&mut self, holiday: Holiday) -> EngineResult<()> {
        if self.holidays.contains_key(&holiday.date) {
            return Err(EngineError::DuplicateEntry {
                entity: "holiday".to_string(),
                key: holiday.date.to_string(),
            });
        }
        self.holidays.insert(holiday.date, holiday);
        Ok(())
    }

    /// Adds a weekly-hours change.
    pub fn add_weekly_hours_change(&mut self, change: WeeklyHoursChange) -> EngineResult<()> {
        let duplicate = self.weekly_hours_changes.iter().any(|c| {
            c.employee_id == change.employee_id && c.effective_from == change.effective_from
        });
        if duplicate {
            return Err(EngineError::DuplicateEntry {
                entity: "weekly hours change".to_string(),
                key: format!("{}/{}", change.employee_id, change.effective_from),
            });
        }
        self.weekly_hours_changes.push(change);
        Ok(())
    }

    fn shift_key_taken(&self, shift: &Shift) -> bool {
        self.shifts.values().any(|s| {
            s.id != shift.id
                && s.employee_id == shift.employee_id
                && s.date == shift.date
                && s.start_time == shift.start_time
        })
    }

    fn duplicate_shift(shift: &Shift) -> EngineError {
        EngineError::DuplicateEntry {
            entity: "shift".to_string(),
            key: format!("{}/{}/{}", shift.employee_id, shift.date, shift.start_time),
        }
    }
}

impl EntryStore for InMemoryStore {
    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.values().cloned().collect())
    }

    fn shifts_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Shift>> {
        let mut shifts: Vec<Shift> = self
            .shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.date >= from && s.date <= to)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.date, s.start_time));
        Ok(shifts)
    }

    fn shift(&self, shift_id: &str) -> EngineResult<Option<Shift>> {
        Ok(self.shifts.get(shift_id).cloned())
    }

    fn open_shift(&self, employee_id: &str) -> EngineResult<Option<Shift>> {
        Ok(self
            .shifts
            .values()
            .find(|s| s.employee_id == employee_id && s.is_open())
            .cloned())
    }

    fn first_shift_date(&self, employee_id: &str) -> EngineResult<Option<NaiveDate>> {
        Ok(self
            .shifts
            .values()
            .filter(|s| s.employee_id == employee_id)
            .map(|s| s.date)
            .min())
    }

    fn absences_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Absence>> {
        let mut absences: Vec<Absence> = self
            .absences
            .iter()
            .filter(|a| a.employee_id == employee_id && a.date >= from && a.date <= to)
            .cloned()
            .collect();
        absences.sort_by_key(|a| (a.date, a.absence_type));
        Ok(absences)
    }

    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Holiday>> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self.holidays.range(from..=to).map(|(_, h)| h.clone()).collect())
    }

    fn weekly_hours_changes(&self, employee_id: &str) -> EngineResult<Vec<WeeklyHoursChange>> {
        Ok(self
            .weekly_hours_changes
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn insert_shift(&mut self, shift: Shift) -> EngineResult<()> {
        if self.shifts.contains_key(&shift.id) {
            return Err(EngineError::DuplicateEntry {
                entity: "shift".to_string(),
                key: shift.id,
            });
        }
        if self.shift_key_taken(&shift) {
            return Err(Self::duplicate_shift(&shift));
        }
        self.shifts.insert(shift.id.clone(), shift);
        Ok(())
    }

    fn update_shift(&mut self, shift: Shift) -> EngineResult<()> {
        if !self.shifts.contains_key(&shift.id) {
            return Err(EngineError::NotFound {
                entity: "shift".to_string(),
                id: shift.id,
            });
        }
        if self.shift_key_taken(&shift) {
            return Err(Self::duplicate_shift(&shift));
        }
        self.shifts.insert(shift.id.clone(), shift);
        Ok(())
    }

    fn insert_absence(&mut self, absence: Absence) -> EngineResult<()> {
        let duplicate = self.absences.iter().any(|a| {
            a.employee_id == absence.employee_id
                && a.date == absence.date
                && a.absence_type == absence.absence_type
        });
        if duplicate {
            return Err(EngineError::DuplicateEntry {
                entity: "absence".to_string(),
                key: format!("{}/{}", absence.employee_id, absence.date),
            });
        }
        self.absences.push(absence);
        Ok(())
    }

    fn closure(&self, closure_id: &str) -> EngineResult<Option<CompanyClosure>> {
        Ok(self.closures.get(closure_id).cloned())
    }

    fn insert_closure(&mut self, closure: CompanyClosure) -> EngineResult<()> {
        if self.closures.contains_key(&closure.id) {
            return Err(EngineError::DuplicateEntry {
                entity: "company closure".to_string(),
                key: closure.id,
            });
        }
        self.closures.insert(closure.id.clone(), closure);
        Ok(())
    }

    fn remove_closure(&mut self, closure_id: &str) -> EngineResult<Vec<Absence>> {
        if self.closures.remove(closure_id).is_none() {
            return Err(EngineError::NotFound {
                entity: "company closure".to_string(),
                id: closure_id.to_string(),
            });
        }
        let (removed, kept): (Vec<Absence>, Vec<Absence>) = std::mem::take(&mut self.absences)
            .into_iter()
            .partition(|a| a.closure_id.as_deref() == Some(closure_id));
        self.absences = kept;
        Ok(removed)
    }
}
