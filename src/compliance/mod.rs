//! Working-time compliance.
//!
//! This module contains the write-path gate that every shift passes before
//! it is stored, and the read-only auditors that scan a period for rest
//! violations:
//!
//! - [`assess_shift`] and the shift write operations built on it
//! - minimum break validation across a day
//! - daily/weekly ceilings, night-work classification, Sunday/holiday flags
//! - minimum rest between working days
//! - compensatory rest after Sunday and holiday work
//!
//! Employees flagged `exempt_from_regulation` skip every check and audit.

mod breaks;
mod classifier;
mod compensatory_rest;
mod gate;
mod rest_period;

pub use breaks::{BreakEvaluation, WorkBlock, evaluate_breaks, minute_of_day, validate_daily_break};
pub use classifier::{
    check_daily_hours, check_weekly_hours, classify_shift, is_night_work, night_overlap_minutes,
    week_start,
};
pub use compensatory_rest::{compensatory_rest_report, has_free_day};
pub use gate::{assess_shift, clock_in, clock_out, record_shift, update_shift, validate_time_range};
pub use rest_period::{rest_hours_between, rest_period_violations, rest_violations_for_all};
