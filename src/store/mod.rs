//! Entry store abstraction.
//!
//! The engine reads and writes shifts, absences, holidays, weekly-hours
//! changes and company closures only through [`EntryStore`]. Durable
//! persistence lives outside this crate; [`InMemoryStore`] backs the HTTP
//! surface, tests and benchmarks.
//!
//! Writes take `&mut self`, so a compliance check and the write it gates
//! always see the same sibling data.

mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Absence, CompanyClosure, Employee, Holiday, Shift, WeeklyHoursChange};

pub use memory::InMemoryStore;

/// Read/write access to time-tracking records.
///
/// Date ranges are inclusive on both ends. Shift lists are ordered by
/// date, then start time.
pub trait EntryStore {
    /// All known employees.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Shifts of `employee_id` dated within `[from, to]`.
    fn shifts_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Shift>>;

    /// Shifts of `employee_id` on a single date.
    fn shifts_on(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Vec<Shift>> {
        self.shifts_between(employee_id, date, date)
    }

    /// A shift by id.
    fn shift(&self, shift_id: &str) -> EngineResult<Option<Shift>>;

    /// The employee's shift without an end time, if any.
    fn open_shift(&self, employee_id: &str) -> EngineResult<Option<Shift>>;

    /// Date of the employee's earliest shift.
    fn first_shift_date(&self, employee_id: &str) -> EngineResult<Option<NaiveDate>>;

    /// Absence days of `employee_id` within `[from, to]`.
    fn absences_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Absence>>;

    /// Public holidays within `[from, to]`.
    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Holiday>>;

    /// All weekly-hours changes of `employee_id`, in any order.
    fn weekly_hours_changes(&self, employee_id: &str) -> EngineResult<Vec<WeeklyHoursChange>>;

    /// Persists a new shift.
    fn insert_shift(&mut self, shift: Shift) -> EngineResult<()>;

    /// Replaces an existing shift with the same id.
    fn update_shift(&mut self, shift: Shift) -> EngineResult<()>;

    /// Persists a new absence day.
    fn insert_absence(&mut self, absence: Absence) -> EngineResult<()>;

    /// A company closure by id.
    fn closure(&self, closure_id: &str) -> EngineResult<Option<CompanyClosure>>;

    /// Persists a new company closure.
    fn insert_closure(&mut self, closure: CompanyClosure) -> EngineResult<()>;

    /// Deletes a company closure together with every absence day linked to
    /// it, returning the removed days.
    fn remove_closure(&mut self, closure_id: &str) -> EngineResult<Vec<Absence>>;
}
