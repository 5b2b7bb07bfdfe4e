//! Minimum rest between working days.
//!
//! Each working day is reduced to its earliest clock-in and latest
//! clock-out. The rest between two consecutive working days in the audited
//! window is the time from the earlier day's last clock-out to the later
//! day's first clock-in. Days without shifts are skipped, so the audit
//! compares consecutive working days rather than consecutive dates.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::error::EngineResult;
use crate::models::{Employee, EmployeeRestViolations, RestViolation, YearMonth};
use crate::store::EntryStore;

const SECONDS_PER_HOUR: i64 = 3600;

/// First and last day of the audited window.
fn audit_window(year: i32, month: Option<u32>) -> EngineResult<(NaiveDate, NaiveDate)> {
    match month {
        Some(month) => {
            let period = YearMonth::new(year, month)?;
            Ok((period.first_day(), period.last_day()))
        }
        None => Ok((
            YearMonth::new(year, 1)?.first_day(),
            YearMonth::new(year, 12)?.last_day(),
        )),
    }
}

/// Rest in hours between two timestamps.
pub fn rest_hours_between(previous_end: NaiveDateTime, next_start: NaiveDateTime) -> Decimal {
    Decimal::from((next_start - previous_end).num_seconds()) / Decimal::from(SECONDS_PER_HOUR)
}

/// Audits the rest periods of `employee` in `year`, or in one month of it.
///
/// `min_rest_hours` overrides the configured minimum. Exempt employees
/// have no violations.
///
/// # Errors
///
/// Returns `InvalidPeriod` if `month` is not 1 to 12.
///
/// # Examples
///
/// ```
/// use timekeeping_engine::compliance::rest_period_violations;
/// use timekeeping_engine::config::RulesConfig;
/// use timekeeping_engine::models::{Employee, Shift};
/// use timekeeping_engine::store::{EntryStore, InMemoryStore};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     weekly_hours: Decimal::from(40),
///     work_days_per_week: 5,
///     vacation_days: 30,
///     track_hours: true,
///     is_night_worker: false,
///     exempt_from_regulation: false,
/// };
/// let shift = |id: &str, day, start, end| Shift {
///     id: id.to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
///     start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(end, 0, 0),
///     break_minutes: 0,
///     note: None,
///     exception_reason: None,
/// };
///
/// let mut store = InMemoryStore::new();
/// store.insert_shift(shift("a", 2, 12, 20)).unwrap();
/// store.insert_shift(shift("b", 3, 6, 12)).unwrap();
///
/// let violations =
///     rest_period_violations(&store, &RulesConfig::default(), &employee, 2026, Some(3), None)
///         .unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].deficit_hours, Decimal::from(1));
/// ```
pub fn rest_period_violations<S: EntryStore + ?Sized>(
    store: &S,
    rules: &RulesConfig,
    employee: &Employee,
    year: i32,
    month: Option<u32>,
    min_rest_hours: Option<Decimal>,
) -> EngineResult<Vec<RestViolation>> {
    let (first, last) = audit_window(year, month)?;
    if employee.exempt_from_regulation {
        return Ok(Vec::new());
    }
    let min_rest = min_rest_hours.unwrap_or(rules.rest.minimum_hours);

    let mut days: BTreeMap<NaiveDate, (NaiveTime, NaiveTime)> = BTreeMap::new();
    for shift in store.shifts_between(&employee.id, first, last)? {
        let Some(end) = shift.end_time else {
            continue;
        };
        days.entry(shift.date)
            .and_modify(|(earliest, latest)| {
                *earliest = (*earliest).min(shift.start_time);
                *latest = (*latest).max(end);
            })
            .or_insert((shift.start_time, end));
    }

    let working_days: Vec<(NaiveDate, NaiveTime, NaiveTime)> = days
        .into_iter()
        .map(|(date, (start, end))| (date, start, end))
        .collect();

    let violations: Vec<RestViolation> = working_days
        .windows(2)
        .filter_map(|pair| {
            let (previous_date, _, previous_latest) = pair[0];
            let (next_date, next_earliest, _) = pair[1];
            let previous_end = previous_date.and_time(previous_latest);
            let next_start = next_date.and_time(next_earliest);
            let rest = rest_hours_between(previous_end, next_start);

            (rest < min_rest).then(|| RestViolation {
                previous_date,
                previous_end,
                next_date,
                next_start,
                rest_hours: rest.round_dp(2),
                min_rest_hours: min_rest,
                deficit_hours: (min_rest - rest).round_dp(2),
            })
        })
        .collect();

    debug!(
        employee_id = %employee.id,
        year,
        month = ?month,
        violations = violations.len(),
        "Audited rest periods"
    );
    Ok(violations)
}

/// Audits every known employee and returns those with violations.
pub fn rest_violations_for_all<S: EntryStore + ?Sized>(
    store: &S,
    rules: &RulesConfig,
    year: i32,
    month: Option<u32>,
    min_rest_hours: Option<Decimal>,
) -> EngineResult<Vec<EmployeeRestViolations>> {
    let mut results = Vec::new();
    for employee in store.employees()? {
        let violations =
            rest_period_violations(store, rules, &employee, year, month, min_rest_hours)?;
        if violations.is_empty() {
            continue;
        }
        results.push(EmployeeRestViolations {
            employee_id: employee.id.clone(),
            violation_count: violations.len(),
            violations,
        });
    }

    info!(year, month = ?month, employees = results.len(), "Rest period audit finished");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Shift;
    use crate::store::InMemoryStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(time_str: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
    }

    fn make_employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            weekly_hours: dec("40"),
            work_days_per_week: 5,
            vacation_days: 30,
            track_hours: true,
            is_night_worker: false,
            exempt_from_regulation: false,
        }
    }

    fn make_shift(employee_id: &str, date: &str, start: &str, end: Option<&str>) -> Shift {
        Shift {
            id: format!("{}_{}_{}", employee_id, date, start),
            employee_id: employee_id.to_string(),
            date: make_date(date),
            start_time: make_time(start),
            end_time: end.map(make_time),
            break_minutes: 0,
            note: None,
            exception_reason: None,
        }
    }

    fn audit(store: &InMemoryStore, employee: &Employee) -> Vec<RestViolation> {
        rest_period_violations(store, &RulesConfig::default(), employee, 2026, None, None).unwrap()
    }

    #[test]
    fn test_ten_hours_rest_is_one_hour_short() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "12:00", Some("20:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "06:00", Some("14:00")))
            .unwrap();

        let violations = audit(&store, &make_employee("emp_001"));
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rest_hours, dec("10.00"));
        assert_eq!(v.deficit_hours, dec("1.00"));
        assert_eq!(v.min_rest_hours, dec("11"));
        assert_eq!(v.previous_end, make_date("2026-03-02").and_time(make_time("20:00")));
        assert_eq!(v.next_start, make_date("2026-03-03").and_time(make_time("06:00")));
    }

    #[test]
    fn test_exactly_eleven_hours_is_compliant() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "12:00", Some("20:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "07:00", Some("14:00")))
            .unwrap();

        assert!(audit(&store, &make_employee("emp_001")).is_empty());
    }

    #[test]
    fn test_days_are_grouped_to_earliest_start_and_latest_end() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "08:00", Some("12:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "17:00", Some("22:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "13:00", Some("18:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "07:30", Some("11:00")))
            .unwrap();

        let violations = audit(&store, &make_employee("emp_001"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rest_hours, dec("9.50"));
        assert_eq!(violations[0].deficit_hours, dec("1.50"));
    }

    #[test]
    fn test_open_shifts_and_gaps_are_ignored() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "12:00", Some("23:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "05:00", None))
            .unwrap();
        // Two days later: 31h of rest
        store
            .insert_shift(make_shift("emp_001", "2026-03-04", "06:00", Some("14:00")))
            .unwrap();

        assert!(audit(&store, &make_employee("emp_001")).is_empty());
    }

    #[test]
    fn test_custom_minimum_and_month_window() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-31", "12:00", Some("20:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-04-01", "08:00", Some("12:00")))
            .unwrap();
        let employee = make_employee("emp_001");
        let rules = RulesConfig::default();

        // The pair straddles the month boundary, so March alone sees one day
        let march =
            rest_period_violations(&store, &rules, &employee, 2026, Some(3), None).unwrap();
        assert!(march.is_empty());

        let strict =
            rest_period_violations(&store, &rules, &employee, 2026, None, Some(dec("13")))
                .unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].deficit_hours, dec("1.00"));
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let store = InMemoryStore::new();
        let result = rest_period_violations(
            &store,
            &RulesConfig::default(),
            &make_employee("emp_001"),
            2026,
            Some(13),
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_exempt_employee_has_no_violations() {
        let mut store = InMemoryStore::new();
        store
            .insert_shift(make_shift("emp_001", "2026-03-02", "12:00", Some("23:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_001", "2026-03-03", "05:00", Some("10:00")))
            .unwrap();
        let mut employee = make_employee("emp_001");
        employee.exempt_from_regulation = true;

        assert!(audit(&store, &employee).is_empty());
    }

    #[test]
    fn test_all_employees_lists_only_violators() {
        let mut store = InMemoryStore::new();
        store.upsert_employee(make_employee("emp_a"));
        store.upsert_employee(make_employee("emp_b"));
        store
            .insert_shift(make_shift("emp_a", "2026-03-02", "12:00", Some("22:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_a", "2026-03-03", "06:00", Some("10:00")))
            .unwrap();
        store
            .insert_shift(make_shift("emp_b", "2026-03-02", "08:00", Some("16:00")))
            .unwrap();

        let results =
            rest_violations_for_all(&store, &RulesConfig::default(), 2026, None, None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].employee_id, "emp_a");
        assert_eq!(results[0].violation_count, 1);
    }
}
