//! Minimum break validation.
//!
//! Breaks are judged per day across all of an employee's shifts. Time
//! between two shifts on the same day counts as break time, so working
//! 08:00-12:00 and 12:30-15:30 without a declared break satisfies a
//! 30-minute minimum.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::BreakRule;
use crate::error::{EngineError, EngineResult, RejectionCode};
use crate::models::{Employee, Shift};
use crate::store::EntryStore;

/// One worked interval on a day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkBlock {
    /// Start minute.
    pub start: i64,
    /// End minute.
    pub end: i64,
    /// Break declared within the interval.
    pub break_minutes: i64,
}

impl WorkBlock {
    /// Builds a block from clock times.
    pub fn new(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> Self {
        Self {
            start: minute_of_day(start),
            end: minute_of_day(end),
            break_minutes: i64::from(break_minutes),
        }
    }
}

/// Minutes since midnight, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Aggregated break figures for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvaluation {
    /// Sum of all interval lengths.
    pub gross_minutes: i64,
    /// Sum of declared breaks.
    pub declared_break_minutes: i64,
    /// Sum of positive gaps between consecutive intervals.
    pub gap_minutes: i64,
    /// Gross minus declared breaks.
    pub net_work_minutes: i64,
    /// Declared breaks plus gaps.
    pub effective_break_minutes: i64,
}

impl BreakEvaluation {
    /// Returns true if the day satisfies `rule`.
    pub fn satisfies(&self, rule: &BreakRule) -> bool {
        self.net_work_minutes <= rule.threshold_minutes
            || self.effective_break_minutes >= rule.minimum_minutes
    }
}

/// Computes the break figures for a day's blocks, in any order.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::compliance::{WorkBlock, evaluate_breaks};
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let evaluation = evaluate_breaks(&[
///     WorkBlock::new(t(12, 30), t(15, 31), 0),
///     WorkBlock::new(t(8, 0), t(12, 0), 0),
/// ]);
///
/// assert_eq!(evaluation.net_work_minutes, 421);
/// assert_eq!(evaluation.gap_minutes, 30);
/// ```
pub fn evaluate_breaks(blocks: &[WorkBlock]) -> BreakEvaluation {
    let mut sorted = blocks.to_vec();
    sorted.sort_by_key(|b| b.start);

    let gross_minutes: i64 = sorted.iter().map(|b| b.end - b.start).sum();
    let declared_break_minutes: i64 = sorted.iter().map(|b| b.break_minutes).sum();
    let gap_minutes: i64 = sorted
        .windows(2)
        .map(|pair| (pair[1].start - pair[0].end).max(0))
        .sum();

    BreakEvaluation {
        gross_minutes,
        declared_break_minutes,
        gap_minutes,
        net_work_minutes: gross_minutes - declared_break_minutes,
        effective_break_minutes: declared_break_minutes + gap_minutes,
    }
}

/// Blocks of the closed shifts in `siblings` plus the candidate.
///
/// Shifts still clocked in and the shift with id `exclude` are skipped.
pub(crate) fn day_blocks(
    siblings: &[Shift],
    exclude: Option<&str>,
    start: NaiveTime,
    end: NaiveTime,
    break_minutes: u32,
) -> Vec<WorkBlock> {
    let mut blocks: Vec<WorkBlock> = siblings
        .iter()
        .filter(|s| Some(s.id.as_str()) != exclude)
        .filter_map(|s| {
            s.end_time
                .map(|end| WorkBlock::new(s.start_time, end, s.break_minutes))
        })
        .collect();
    blocks.push(WorkBlock::new(start, end, break_minutes));
    blocks
}

/// Checks that the employee's day, with `candidate`, meets the minimum
/// break rule.
///
/// `exclude` names a stored shift to leave out of the day, normally the one
/// being edited. A candidate without an end time has nothing to check.
///
/// # Errors
///
/// Returns `ShiftRejected` with `BREAK_TOO_SHORT` when more than the
/// threshold is worked with less than the minimum effective break. Exempt
/// employees are never rejected.
pub fn validate_daily_break<S: EntryStore + ?Sized>(
    store: &S,
    rule: &BreakRule,
    employee: &Employee,
    candidate: &Shift,
    exclude: Option<&str>,
) -> EngineResult<()> {
    if employee.exempt_from_regulation {
        return Ok(());
    }
    let Some(end) = candidate.end_time else {
        return Ok(());
    };

    let siblings = store.shifts_on(&employee.id, candidate.date)?;
    let blocks = day_blocks(
        &siblings,
        exclude,
        candidate.start_time,
        end,
        candidate.break_minutes,
    );
    let evaluation = evaluate_breaks(&blocks);
    if evaluation.satisfies(rule) {
        return Ok(());
    }

    Err(EngineError::rejected(
        RejectionCode::BreakTooShort,
        format!(
            "More than {}h of work requires a break of at least {} minutes. \
             Net working time: {}h {}min, total break: {} minutes.",
            rule.threshold_minutes / 60,
            rule.minimum_minutes,
            evaluation.net_work_minutes / 60,
            evaluation.net_work_minutes % 60,
            evaluation.effective_break_minutes
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_time(time_str: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn candidate(start: &str, end: &str) -> Shift {
        make_shift("candidate", start, Some(end), 0)
    }

    fn block(start: &str, end: &str, break_minutes: u32) -> WorkBlock {
        WorkBlock::new(make_time(start), make_time(end), break_minutes)
    }

    fn make_employee(exempt: bool) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            weekly_hours: Decimal::from(40),
            work_days_per_week: 5,
            vacation_days: 30,
            track_hours: true,
            is_night_worker: false,
            exempt_from_regulation: exempt,
        }
    }

    fn make_shift(id: &str, start: &str, end: Option<&str>, break_minutes: u32) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            date: make_date("2026-01-15"),
            start_time: make_time(start),
            end_time: end.map(make_time),
            break_minutes,
            note: None,
            exception_reason: None,
        }
    }

    #[test]
    fn test_exactly_six_hours_without_break_is_accepted() {
        let evaluation = evaluate_breaks(&[block("08:00", "14:00", 0)]);
        assert_eq!(evaluation.net_work_minutes, 360);
        assert!(evaluation.satisfies(&BreakRule::default()));
    }

    #[test]
    fn test_361_minutes_with_short_break_is_rejected() {
        let evaluation = evaluate_breaks(&[block("08:00", "14:30", 29)]);
        assert_eq!(evaluation.net_work_minutes, 361);
        assert!(!evaluation.satisfies(&BreakRule::default()));
    }

    #[test]
    fn test_gap_between_shifts_counts_as_break() {
        let evaluation = evaluate_breaks(&[block("08:00", "12:00", 0), block("12:30", "14:31", 0)]);
        assert_eq!(evaluation.net_work_minutes, 361);
        assert_eq!(evaluation.gap_minutes, 30);
        assert_eq!(evaluation.effective_break_minutes, 30);
        assert!(evaluation.satisfies(&BreakRule::default()));
    }

    #[test]
    fn test_overlapping_blocks_add_no_gap() {
        let evaluation = evaluate_breaks(&[block("08:00", "12:00", 0), block("11:00", "13:00", 0)]);
        assert_eq!(evaluation.gap_minutes, 0);
        assert_eq!(evaluation.gross_minutes, 360);
    }

    #[test]
    fn test_validate_rejects_with_break_too_short() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("s1", "08:00", Some("12:00"), 0))
            .unwrap();

        let result = validate_daily_break(
            &store,
            &BreakRule::default(),
            &make_employee(false),
            &candidate("12:10", "14:21"),
            None,
        );

        match result {
            Err(EngineError::ShiftRejected { code, message }) => {
                assert_eq!(code, RejectionCode::BreakTooShort);
                assert!(message.contains("6h 11min"));
                assert!(message.contains("10 minutes"));
            }
            other => panic!("Expected BreakTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_excludes_edited_shift_and_open_siblings() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("s1", "06:00", Some("14:00"), 0))
            .unwrap();
        store.insert_shift(make_shift("s2", "15:00", None, 0)).unwrap();

        // Editing s1 down to 6h: the stored 8h version must not count
        let result = validate_daily_break(
            &store,
            &BreakRule::default(),
            &make_employee(false),
            &make_shift("s1", "06:00", Some("12:00"), 0),
            Some("s1"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_exempt_employee_skips_break_rule() {
        let store = InMemoryStore::new();
        let result = validate_daily_break(
            &store,
            &BreakRule::default(),
            &make_employee(true),
            &candidate("07:00", "18:00"),
            None,
        );
        assert!(result.is_ok());
    }
}
