//! Hour accounting.
//!
//! This module turns stored shifts, absences, holidays and weekly-hours
//! changes into targets, balances and accounts:
//!
//! - effective-dated weekly hours and the daily target
//! - monthly target, actual hours and balance
//! - the cumulative overtime ledger
//! - the vacation account
//! - absence booking with range expansion
//! - company closures booking vacation for every employee
//! - team and absence reports
//!
//! Every function reads the store afresh; nothing is cached between calls.

mod absences;
mod closures;
mod ledger;
mod reports;
mod resolver;
mod targets;
mod vacation;

pub use absences::{AbsenceBooking, AbsenceRequest, book_absence, bookable_days};
pub use closures::{ClosureBooking, book_company_closure, remove_company_closure};
pub use ledger::{overtime_account, overtime_history};
pub use reports::{FALLBACK_DAILY_HOURS, monthly_team_report, yearly_absence_summary};
pub use resolver::{
    WORKING_DAYS_PER_WEEK, WeeklyHoursHistory, current_weekly_hours, daily_target,
    effective_weekly_hours,
};
pub use targets::{monthly_actual, monthly_balance, monthly_summary, monthly_target};
pub use vacation::vacation_account;
