//! Shift classification against hour ceilings and working-time flags.
//!
//! The classifier looks at a candidate shift together with the employee's
//! other shifts and decides:
//!
//! - whether the day's hours exceed the hard ceiling (rejection) or the
//!   soft ceiling (warning)
//! - whether the Monday-to-Sunday week exceeds the weekly soft ceiling
//! - whether the shift is night work, and whether a night worker is being
//!   extended past the soft ceiling
//! - whether the shift falls on a Sunday or public holiday
//!
//! Only the hard daily ceiling blocks a write; everything else is reported
//! as a warning on the assessment.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;

use crate::config::{DailyLimits, NightWindow, RulesConfig, WeeklyLimits};
use crate::error::{EngineError, EngineResult, RejectionCode};
use crate::models::{Employee, Shift, ShiftAssessment, WarningCode, WorkingTimeWarning};
use crate::store::EntryStore;

use super::breaks::minute_of_day;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes of `[start, end)` that fall inside the night window.
///
/// An end before the start is read as ending on the following day. The
/// window is repeated for the previous, current and next day so that both
/// early-morning and late-evening portions are counted.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::compliance::night_overlap_minutes;
/// use timekeeping_engine::config::NightWindow;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let window = NightWindow::default();
///
/// assert_eq!(night_overlap_minutes(t(22, 0), t(1, 30), &window), 150);
/// assert_eq!(night_overlap_minutes(t(22, 0), t(23, 30), &window), 30);
/// assert_eq!(night_overlap_minutes(t(4, 0), t(12, 0), &window), 120);
/// ```
pub fn night_overlap_minutes(start: NaiveTime, end: NaiveTime, window: &NightWindow) -> i64 {
    let start = minute_of_day(start);
    let mut end = minute_of_day(end);
    if end < start {
        end += MINUTES_PER_DAY;
    }

    let window_start = minute_of_day(window.window_start);
    let mut window_end = minute_of_day(window.window_end);
    if window_end <= window_start {
        window_end += MINUTES_PER_DAY;
    }

    (-1..=1)
        .map(|day| {
            let lo = window_start + day * MINUTES_PER_DAY;
            let hi = window_end + day * MINUTES_PER_DAY;
            (end.min(hi) - start.max(lo)).max(0)
        })
        .sum()
}

/// Returns true if the shift overlaps the night window by more than the
/// configured minimum.
pub fn is_night_work(start: NaiveTime, end: NaiveTime, window: &NightWindow) -> bool {
    night_overlap_minutes(start, end, window) > window.minimum_overlap_minutes
}

/// Applies the daily ceilings to a day's total hours.
///
/// # Errors
///
/// Returns `ShiftRejected` with `DAILY_HOURS_EXCEEDED` above the hard
/// ceiling.
pub fn check_daily_hours(
    daily_hours: Decimal,
    limits: &DailyLimits,
) -> EngineResult<Option<WorkingTimeWarning>> {
    if daily_hours > limits.hard_ceiling_hours {
        return Err(EngineError::rejected(
            RejectionCode::DailyHoursExceeded,
            format!(
                "Daily working time of {}h exceeds the maximum of {}h",
                daily_hours, limits.hard_ceiling_hours
            ),
        ));
    }
    if daily_hours > limits.soft_ceiling_hours {
        return Ok(Some(WorkingTimeWarning::new(
            WarningCode::DailyHoursWarning,
            format!(
                "Daily working time of {}h exceeds {}h; the extension must be \
                 compensated within six months",
                daily_hours, limits.soft_ceiling_hours
            ),
        )));
    }
    Ok(None)
}

/// Applies the weekly soft ceiling to a week's total hours.
pub fn check_weekly_hours(
    weekly_hours: Decimal,
    limits: &WeeklyLimits,
) -> Option<WorkingTimeWarning> {
    (weekly_hours > limits.soft_ceiling_hours).then(|| {
        WorkingTimeWarning::new(
            WarningCode::WeeklyHoursWarning,
            format!(
                "Weekly working time of {}h exceeds {}h",
                weekly_hours, limits.soft_ceiling_hours
            ),
        )
    })
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Sum of net hours of the closed shifts in `shifts`, leaving out `exclude`.
fn closed_hours(shifts: &[Shift], exclude: Option<&str>) -> Decimal {
    shifts
        .iter()
        .filter(|s| Some(s.id.as_str()) != exclude)
        .filter_map(|s| s.net_hours())
        .sum()
}

/// Informational flags for Sunday and holiday work.
fn calendar_flags(candidate: &Shift, holiday: Option<&str>) -> Vec<WorkingTimeWarning> {
    let reason = candidate
        .exception_reason
        .as_deref()
        .map(|r| format!(" Reason: {}", r))
        .unwrap_or_default();

    let mut flags = Vec::new();
    if candidate.date.weekday() == Weekday::Sun {
        flags.push(WorkingTimeWarning::new(
            WarningCode::SundayWork,
            format!("Work on Sunday {}.{}", candidate.date, reason),
        ));
    }
    if let Some(name) = holiday {
        flags.push(WorkingTimeWarning::new(
            WarningCode::HolidayWork,
            format!("Work on public holiday {} ({}).{}", candidate.date, name, reason),
        ));
    }
    flags
}

/// Classifies `candidate` against the employee's other shifts.
///
/// `exclude` names a stored shift to leave out of the daily and weekly
/// sums, normally the one being edited. A candidate without an end time is
/// only flagged for Sunday or holiday work.
///
/// Exempt employees get an empty assessment.
///
/// # Errors
///
/// Returns `ShiftRejected` with `DAILY_HOURS_EXCEEDED` when the day would
/// exceed the hard ceiling.
pub fn classify_shift<S: EntryStore + ?Sized>(
    store: &S,
    rules: &RulesConfig,
    employee: &Employee,
    candidate: &Shift,
    exclude: Option<&str>,
) -> EngineResult<ShiftAssessment> {
    if employee.exempt_from_regulation {
        return Ok(ShiftAssessment::default());
    }

    let holiday = store
        .holidays_between(candidate.date, candidate.date)?
        .into_iter()
        .next()
        .map(|h| h.name);
    let mut assessment = ShiftAssessment {
        warnings: calendar_flags(candidate, holiday.as_deref()),
        ..Default::default()
    };

    let (Some(end), Some(candidate_hours)) = (candidate.end_time, candidate.net_hours()) else {
        return Ok(assessment);
    };

    let day_shifts = store.shifts_on(&employee.id, candidate.date)?;
    let daily_hours = closed_hours(&day_shifts, exclude) + candidate_hours;
    if let Some(warning) = check_daily_hours(daily_hours, &rules.daily)? {
        assessment.warnings.push(warning);
    }

    let monday = week_start(candidate.date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    let week_shifts = store.shifts_between(&employee.id, monday, sunday)?;
    let weekly_hours = closed_hours(&week_shifts, exclude) + candidate_hours;
    if let Some(warning) = check_weekly_hours(weekly_hours, &rules.weekly) {
        assessment.warnings.push(warning);
    }

    let night_work = is_night_work(candidate.start_time, end, &rules.night);
    if employee.is_night_worker && night_work && daily_hours > rules.daily.soft_ceiling_hours {
        assessment.warnings.push(WorkingTimeWarning::new(
            WarningCode::NightWorkExtensionWarning,
            format!(
                "Night worker scheduled for {}h; an extension to {}h must be \
                 compensated within one month",
                daily_hours, rules.daily.hard_ceiling_hours
            ),
        ));
    }

    assessment.daily_hours = Some(daily_hours);
    assessment.weekly_hours = Some(weekly_hours);
    assessment.night_work = night_work;
    Ok(assessment)
}
