//! Core data models for the timekeeping engine.
//!
//! This module contains the domain records read from the entry store and
//! the result types produced by the accounting and compliance modules.

mod absence;
mod calendar;
mod closure;
mod employee;
mod reports;
mod shift;
mod weekly_hours;

pub use absence::{Absence, AbsenceType};
pub use calendar::{Holiday, YearMonth, is_weekend};
pub use closure::CompanyClosure;
pub use employee::Employee;
pub use reports::{
    CompensatoryRestKind, CompensatoryRestReport, CompensatoryRestViolation, EmployeeMonthlyReport,
    EmployeeRestViolations, LedgerEntry, MonthlySummary, OvertimeAccount, RecordedShift,
    RestViolation, ShiftAssessment, VacationAccount, WarningCode, WorkingTimeWarning,
    YearlyAbsenceSummary,
};
pub use shift::{Shift, ShiftDraft, net_hours};
pub use weekly_hours::WeeklyHoursChange;
