//! Shift model and net-hours arithmetic.
//!
//! A shift lives on a single calendar date with a start time and an end
//! time that stays empty while the employee is clocked in.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// Computes net hours for a time range: `max(0, (end - start) - break)`,
/// rounded to two decimals.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::models::net_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
/// assert_eq!(net_hours(start, end, 30), Decimal::new(800, 2));
/// ```
pub fn net_hours(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> Decimal {
    let worked_seconds = (end - start).num_seconds() - i64::from(break_minutes) * 60;
    let worked_seconds = worked_seconds.max(0);

    (Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR)).round_dp(2)
}

/// Represents a recorded work shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start_time: NaiveTime,
    /// Clock-out time; `None` while the employee is still clocked in.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Declared break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Justification for Sunday or holiday work.
    #[serde(default)]
    pub exception_reason: Option<String>,
}

impl Shift {
    /// Returns true while the shift has no end time.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Net hours worked, or `None` while the shift is open.
    ///
    /// # Examples
    ///
    /// ```
    /// use timekeeping_engine::models::Shift;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     end_time: Some(NaiveTime::from_hms_opt(16, 30, 0).unwrap()),
    ///     break_minutes: 30,
    ///     note: None,
    ///     exception_reason: None,
    /// };
    /// assert_eq!(shift.net_hours(), Some(Decimal::new(800, 2)));
    /// ```
    pub fn net_hours(&self) -> Option<Decimal> {
        self.end_time
            .map(|end| net_hours(self.start_time, end, self.break_minutes))
    }

    /// Clock-in as a full timestamp.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Clock-out as a full timestamp, if the shift is closed.
    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        self.end_time.map(|end| self.date.and_time(end))
    }

    /// Returns the day of the week of the shift.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }
}

/// The caller-supplied fields of a shift being entered or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start_time: NaiveTime,
    /// Clock-out time, if known.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Declared break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Justification for Sunday or holiday work.
    #[serde(default)]
    pub exception_reason: Option<String>,
}

impl ShiftDraft {
    /// Turns the draft into a shift with the given identity.
    pub fn into_shift(self, id: impl Into<String>, employee_id: impl Into<String>) -> Shift {
        Shift {
            id: id.into(),
            employee_id: employee_id.into(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            break_minutes: self.break_minutes,
            note: self.note,
            exception_reason: self.exception_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_shift(start: NaiveTime, end: Option<NaiveTime>, break_minutes: u32) -> Shift {
        Shift {
            id: "shift_001".to_string(),
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            start_time: start,
            end_time: end,
            break_minutes,
            note: None,
            exception_reason: None,
        }
    }

    #[test]
    fn test_8_hour_shift_no_break() {
        let shift = make_shift(time(9, 0), Some(time(17, 0)), 0);
        assert_eq!(shift.net_hours(), Some(Decimal::new(800, 2)));
    }

    #[test]
    fn test_break_is_subtracted() {
        let shift = make_shift(time(9, 0), Some(time(17, 30)), 45);
        assert_eq!(shift.net_hours(), Some(Decimal::new(775, 2)));
    }

    #[test]
    fn test_break_longer_than_shift_clamps_to_zero() {
        let shift = make_shift(time(8, 0), Some(time(8, 20)), 30);
        assert_eq!(shift.net_hours(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_twenty_minutes_rounds_to_two_decimals() {
        let shift = make_shift(time(9, 0), Some(time(9, 20)), 0);
        assert_eq!(shift.net_hours(), Some(Decimal::new(33, 2)));
    }

    #[test]
    fn test_open_shift_has_no_net_hours() {
        let shift = make_shift(time(9, 0), None, 0);
        assert!(shift.is_open());
        assert_eq!(shift.net_hours(), None);
        assert_eq!(shift.end_datetime(), None);
    }

    #[test]
    fn test_timestamps_combine_date_and_time() {
        let shift = make_shift(time(6, 15), Some(time(14, 0)), 0);
        assert_eq!(
            shift.start_datetime(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_time(time(6, 15))
        );
        assert_eq!(shift.day_of_week(), Weekday::Thu);
    }

    #[test]
    fn test_shift_deserialization_defaults() {
        let json = r#"{
            "id": "shift_001",
            "employee_id": "emp_001",
            "date": "2026-01-15",
            "start_time": "09:00:00"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert!(shift.is_open());
        assert_eq!(shift.break_minutes, 0);
        assert_eq!(shift.note, None);
    }

    fn minute_of_day(minute: u32) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0).unwrap()
    }

    proptest! {
        #[test]
        fn prop_net_hours_bounded_by_span(
            (start, end) in (0u32..1439).prop_flat_map(|start| (Just(start), (start + 1)..1440)),
            break_minutes in 0u32..600,
        ) {
            let shift = make_shift(minute_of_day(start), Some(minute_of_day(end)), break_minutes);
            let hours = shift.net_hours().unwrap();
            let span = (Decimal::from(end - start) / Decimal::from(60)).round_dp(2);

            prop_assert!(hours >= Decimal::ZERO);
            prop_assert!(hours <= span);
            prop_assert!(hours.scale() <= 2);
        }
    }
}
