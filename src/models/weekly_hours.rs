//! Effective-dated weekly hours changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A change of contracted weekly hours taking effect on a given date.
///
/// At most one change exists per (employee, effective_from).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHoursChange {
    /// The employee whose contract changed.
    pub employee_id: String,
    /// First day on which `weekly_hours` applies.
    pub effective_from: NaiveDate,
    /// Contracted weekly hours from `effective_from` on.
    pub weekly_hours: Decimal,
    /// Optional note about the change.
    #[serde(default)]
    pub note: Option<String>,
}
