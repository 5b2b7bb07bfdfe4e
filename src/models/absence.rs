//! Absence model.
//!
//! Absences are stored one record per day. A booking over a range is
//! expanded into per-day records at write time, each keeping the requested
//! range end for reference.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Paid vacation; consumes the vacation account.
    Vacation,
    /// Sick leave.
    Sick,
    /// Training or education.
    Training,
    /// Any other absence.
    Other,
}

impl AbsenceType {
    /// All absence types in reporting order.
    pub const ALL: [AbsenceType; 4] = [
        AbsenceType::Vacation,
        AbsenceType::Sick,
        AbsenceType::Training,
        AbsenceType::Other,
    ];
}

/// A single absence day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absence {
    /// Unique identifier for the absence record.
    pub id: String,
    /// The absent employee.
    pub employee_id: String,
    /// The day this record covers.
    pub date: NaiveDate,
    /// End of the booked range this record was expanded from, if any.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The kind of absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    /// Hours the absence consumes on this day.
    pub hours: Decimal,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// The company closure that booked this day, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_id: Option<String>,
}

impl Absence {
    /// Returns true for vacation absences.
    pub fn is_vacation(&self) -> bool {
        self.absence_type == AbsenceType::Vacation
    }
}
