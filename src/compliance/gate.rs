//! Pre-commit gate for shift writes.
//!
//! Every shift write (clock-in, clock-out, manual entry, edit) passes
//! through [`assess_shift`] before it reaches the store. The check and the
//! write share one `&mut` borrow of the store, so no other write can slip
//! in between them.
//!
//! Order of checks:
//! 1. time range (end after start), for every employee
//! 2. exemption: exempt employees are accepted with an empty assessment
//! 3. minimum break across the day
//! 4. daily/weekly ceilings, night work, Sunday/holiday flags

use chrono::{NaiveTime, Timelike};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::RulesConfig;
use crate::error::{EngineError, EngineResult, RejectionCode};
use crate::models::{Employee, RecordedShift, Shift, ShiftAssessment, ShiftDraft};
use crate::store::EntryStore;

use super::breaks::validate_daily_break;
use super::classifier::classify_shift;

/// Rejects a closed shift whose end is not after its start.
pub fn validate_time_range(candidate: &Shift) -> EngineResult<()> {
    match candidate.end_time {
        Some(end) if end <= candidate.start_time => Err(EngineError::rejected(
            RejectionCode::InvalidTimeRange,
            format!(
                "End time {} must be after start time {}",
                end, candidate.start_time
            ),
        )),
        _ => Ok(()),
    }
}

/// Runs every working-time check for `candidate`.
///
/// `exclude` names the stored shift being replaced, if any, so that it is
/// not counted twice.
///
/// # Errors
///
/// Returns `ShiftRejected` with `INVALID_TIME_RANGE`, `BREAK_TOO_SHORT` or
/// `DAILY_HOURS_EXCEEDED`.
pub fn assess_shift<S: EntryStore + ?Sized>(
    store: &S,
    rules: &RulesConfig,
    employee: &Employee,
    candidate: &Shift,
    exclude: Option<&str>,
) -> EngineResult<ShiftAssessment> {
    validate_time_range(candidate)?;
    if employee.exempt_from_regulation {
        return Ok(ShiftAssessment::default());
    }

    validate_daily_break(store, &rules.breaks, employee, candidate, exclude)?;
    classify_shift(store, rules, employee, candidate, exclude)
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn ensure_start_free<S: EntryStore + ?Sized>(
    store: &S,
    candidate: &Shift,
    exclude: Option<&str>,
) -> EngineResult<()> {
    let taken = store
        .shifts_on(&candidate.employee_id, candidate.date)?
        .iter()
        .any(|s| Some(s.id.as_str()) != exclude && s.start_time == candidate.start_time);
    if taken {
        return Err(EngineError::rejected(
            RejectionCode::DuplicateShift,
            format!(
                "A shift starting at {} on {} already exists",
                candidate.start_time, candidate.date
            ),
        ));
    }
    Ok(())
}

fn ensure_no_open_shift<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    exclude: Option<&str>,
) -> EngineResult<()> {
    match store.open_shift(&employee.id)? {
        Some(open) if Some(open.id.as_str()) != exclude => Err(EngineError::rejected(
            RejectionCode::OpenShiftExists,
            format!(
                "Already clocked in since {} on {}",
                open.start_time, open.date
            ),
        )),
        _ => Ok(()),
    }
}

fn log_outcome(action: &str, shift: &Shift, assessment: &ShiftAssessment) {
    if assessment.warnings.is_empty() {
        info!(
            employee_id = %shift.employee_id,
            shift_id = %shift.id,
            date = %shift.date,
            "{} accepted",
            action
        );
    } else {
        warn!(
            employee_id = %shift.employee_id,
            shift_id = %shift.id,
            date = %shift.date,
            warnings = assessment.warnings.len(),
            "{} accepted with warnings",
            action
        );
    }
}

fn log_rejection(action: &str, employee: &Employee, error: &EngineError) {
    if let Some(code) = error.rejection_code() {
        warn!(employee_id = %employee.id, code = %code, "{} rejected", action);
    }
}

/// Opens a shift at the clock's current time.
///
/// # Errors
///
/// Returns `OPEN_SHIFT_EXISTS` if the employee is already clocked in, or
/// `DUPLICATE_SHIFT` if a shift with the same start already exists.
pub fn clock_in<S: EntryStore + ?Sized>(
    store: &mut S,
    rules: &RulesConfig,
    employee: &Employee,
    clock: &dyn Clock,
    note: Option<String>,
) -> EngineResult<RecordedShift> {
    let now = clock.now();
    let draft = ShiftDraft {
        date: now.date(),
        start_time: truncate_to_minute(now.time()),
        end_time: None,
        break_minutes: 0,
        note,
        exception_reason: None,
    };
    record_shift(store, rules, employee, draft)
        .inspect_err(|e| log_rejection("Clock-in", employee, e))
}

/// Closes the open shift `shift_id` at the clock's current time.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist or belongs to someone
/// else, `InvalidShift` if it is already closed, `INVALID_TIME_RANGE` if
/// the clock has moved past the shift's date, and any rejection from
/// [`assess_shift`].
pub fn clock_out<S: EntryStore + ?Sized>(
    store: &mut S,
    rules: &RulesConfig,
    employee: &Employee,
    clock: &dyn Clock,
    shift_id: &str,
    break_minutes: u32,
) -> EngineResult<RecordedShift> {
    let stored = owned_shift(&*store, employee, shift_id)?;
    if !stored.is_open() {
        return Err(EngineError::InvalidShift {
            shift_id: shift_id.to_string(),
            message: "shift is already clocked out".to_string(),
        });
    }

    let now = clock.now();
    if now.date() != stored.date {
        let error = EngineError::rejected(
            RejectionCode::InvalidTimeRange,
            format!(
                "Clock-out on {} does not match the shift date {}. Edit the shift instead.",
                now.date(),
                stored.date
            ),
        );
        log_rejection("Clock-out", employee, &error);
        return Err(error);
    }

    let mut shift = stored;
    shift.end_time = Some(truncate_to_minute(now.time()));
    shift.break_minutes = break_minutes;

    let assessment = assess_shift(&*store, rules, employee, &shift, Some(shift_id))
        .inspect_err(|e| log_rejection("Clock-out", employee, e))?;
    store.update_shift(shift.clone())?;
    log_outcome("Clock-out", &shift, &assessment);
    Ok(RecordedShift { shift, assessment })
}

/// Records a manually entered shift.
///
/// A draft without an end time opens a shift and is subject to the same
/// one-open-shift rule as [`clock_in`].
pub fn record_shift<S: EntryStore + ?Sized>(
    store: &mut S,
    rules: &RulesConfig,
    employee: &Employee,
    draft: ShiftDraft,
) -> EngineResult<RecordedShift> {
    let shift = draft.into_shift(Uuid::new_v4().to_string(), employee.id.clone());

    ensure_start_free(&*store, &shift, None)?;
    if shift.is_open() {
        ensure_no_open_shift(&*store, employee, None)?;
    }
    let assessment = assess_shift(&*store, rules, employee, &shift, None)
        .inspect_err(|e| log_rejection("Shift entry", employee, e))?;

    store.insert_shift(shift.clone())?;
    log_outcome("Shift entry", &shift, &assessment);
    Ok(RecordedShift { shift, assessment })
}

/// Replaces the fields of shift `shift_id` with `draft`.
///
/// The stored version of the shift is left out of the sibling sums.
pub fn update_shift<S: EntryStore + ?Sized>(
    store: &mut S,
    rules: &RulesConfig,
    employee: &Employee,
    shift_id: &str,
    draft: ShiftDraft,
) -> EngineResult<RecordedShift> {
    owned_shift(&*store, employee, shift_id)?;
    let shift = draft.into_shift(shift_id, employee.id.clone());

    ensure_start_free(&*store, &shift, Some(shift_id))?;
    if shift.is_open() {
        ensure_no_open_shift(&*store, employee, Some(shift_id))?;
    }
    let assessment = assess_shift(&*store, rules, employee, &shift, Some(shift_id))
        .inspect_err(|e| log_rejection("Shift edit", employee, e))?;

    store.update_shift(shift.clone())?;
    log_outcome("Shift edit", &shift, &assessment);
    Ok(RecordedShift { shift, assessment })
}

fn owned_shift<S: EntryStore + ?Sized>(
    store: &S,
    employee: &Employee,
    shift_id: &str,
) -> EngineResult<Shift> {
    match store.shift(shift_id)? {
        Some(shift) if shift.employee_id == employee.id => Ok(shift),
        _ => Err(EngineError::NotFound {
            entity: "shift".to_string(),
            id: shift_id.to_string(),
        }),
    }
}
