//! Result models for accounting, shift checks and audits.
//!
//! This module contains the types returned by the accounting calculators,
//! the write-path gate and the read-only auditors. All hour quantities are
//! two-decimal [`Decimal`]s and all day quantities one-decimal.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Shift, YearMonth};

/// Stable codes for non-blocking warnings.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::WarningCode;
///
/// let json = serde_json::to_string(&WarningCode::DailyHoursWarning).unwrap();
/// assert_eq!(json, "\"DAILY_HOURS_WARNING\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Daily hours above the soft ceiling.
    DailyHoursWarning,
    /// Weekly hours above the soft ceiling.
    WeeklyHoursWarning,
    /// Night worker extended beyond the soft daily ceiling.
    NightWorkExtensionWarning,
    /// Work recorded on a Sunday.
    SundayWork,
    /// Work recorded on a public holiday.
    HolidayWork,
    /// A vacation booking overdraws the vacation account.
    VacationBudgetExceeded,
}

/// A non-blocking warning attached to a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeWarning {
    /// Machine-readable code.
    pub code: WarningCode,
    /// Human-readable description.
    pub message: String,
}

impl WorkingTimeWarning {
    /// Creates a warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of an accepted shift check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssessment {
    /// Net hours on the shift's date including the candidate, if it is closed.
    pub daily_hours: Option<Decimal>,
    /// Net hours in the shift's Monday-to-Sunday week including the candidate.
    pub weekly_hours: Option<Decimal>,
    /// Whether the candidate classifies as night work.
    pub night_work: bool,
    /// Accumulated non-blocking warnings.
    pub warnings: Vec<WorkingTimeWarning>,
}

impl ShiftAssessment {
    /// Returns true if a warning with `code` was raised.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// A shift that passed the gate and was written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedShift {
    /// The persisted shift.
    pub shift: Shift,
    /// The check result that accompanied the write.
    pub assessment: ShiftAssessment,
}

/// Target, actual and balance for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month.
    pub period: YearMonth,
    /// Expected hours.
    pub target_hours: Decimal,
    /// Net hours of closed shifts.
    pub actual_hours: Decimal,
    /// Actual minus target; positive is overtime.
    pub balance: Decimal,
}

/// One month of the overtime ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The month.
    pub period: YearMonth,
    /// Expected hours.
    pub target_hours: Decimal,
    /// Net hours of closed shifts.
    pub actual_hours: Decimal,
    /// Actual minus target.
    pub balance: Decimal,
    /// Running sum of balances through this month.
    pub cumulative: Decimal,
}

/// The overtime account with its monthly history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeAccount {
    /// Last month included.
    pub up_to: YearMonth,
    /// Cumulative balance through `up_to`.
    pub current_balance: Decimal,
    /// Per-month entries from the first-shift month, oldest first.
    pub history: Vec<LedgerEntry>,
}

/// Vacation budget and consumption for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationAccount {
    /// Calendar year.
    pub year: i32,
    /// Annual allowance in days.
    pub budget_days: u32,
    /// Allowance converted to hours.
    pub budget_hours: Decimal,
    /// Vacation hours booked in the year.
    pub used_hours: Decimal,
    /// Booked hours converted to days.
    pub used_days: Decimal,
    /// Budget minus used hours.
    pub remaining_hours: Decimal,
    /// Remaining hours converted to days.
    pub remaining_days: Decimal,
}

/// Rest between two working days shorter than the minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestViolation {
    /// Earlier working day.
    pub previous_date: NaiveDate,
    /// Latest clock-out on the earlier day.
    pub previous_end: NaiveDateTime,
    /// Later working day.
    pub next_date: NaiveDate,
    /// Earliest clock-in on the later day.
    pub next_start: NaiveDateTime,
    /// Measured rest.
    pub rest_hours: Decimal,
    /// Required rest.
    pub min_rest_hours: Decimal,
    /// Required minus measured rest.
    pub deficit_hours: Decimal,
}

/// Rest violations of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRestViolations {
    /// The employee.
    pub employee_id: String,
    /// Violations in date order.
    pub violations: Vec<RestViolation>,
    /// Number of violations.
    pub violation_count: usize,
}

/// Why a worked day requires compensatory rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensatoryRestKind {
    /// Work on a Sunday.
    Sunday,
    /// Work on a public holiday.
    Holiday,
}

/// A worked Sunday or holiday with no free day inside its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensatoryRestViolation {
    /// The worked Sunday or holiday.
    pub date: NaiveDate,
    /// Sunday or holiday.
    pub kind: CompensatoryRestKind,
    /// Length of the window that was searched.
    pub window_days: i64,
}

/// Compensatory rest audit for one employee and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensatoryRestReport {
    /// The employee.
    pub employee_id: String,
    /// Calendar year audited.
    pub year: i32,
    /// Number of worked Sundays and holidays examined.
    pub checked_days: usize,
    /// Days with no compensatory rest, in date order.
    pub violations: Vec<CompensatoryRestViolation>,
    /// True when there are no violations.
    pub compliant: bool,
}

/// One employee's line in the monthly team report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthlyReport {
    /// The employee.
    pub employee_id: String,
    /// Weekly hours in force on the last day of the month.
    pub weekly_hours: Decimal,
    /// Expected hours.
    pub target_hours: Decimal,
    /// Net hours of closed shifts.
    pub actual_hours: Decimal,
    /// Actual minus target.
    pub balance: Decimal,
    /// Overtime account through the month.
    pub overtime_cumulative: Decimal,
    /// Vacation hours in the month.
    pub vacation_hours: Decimal,
    /// Sick hours in the month.
    pub sick_hours: Decimal,
}

/// Absence days per type for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAbsenceSummary {
    /// The employee.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Vacation days.
    pub vacation_days: Decimal,
    /// Sick days.
    pub sick_days: Decimal,
    /// Training days.
    pub training_days: Decimal,
    /// Other absence days.
    pub other_days: Decimal,
    /// Sum of all types.
    pub total_days: Decimal,
}
