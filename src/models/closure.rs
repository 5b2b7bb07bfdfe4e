//! Company closures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A company-wide closure during which every employee takes vacation.
///
/// The vacation days it books carry its id in [`Absence::closure_id`].
///
/// [`Absence::closure_id`]: super::Absence::closure_id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyClosure {
    /// Unique identifier for the closure.
    pub id: String,
    /// Display name, e.g. "Christmas shutdown".
    pub name: String,
    /// First day of the closure.
    pub start_date: NaiveDate,
    /// Last day of the closure, inclusive.
    pub end_date: NaiveDate,
}

impl CompanyClosure {
    /// The note written onto every vacation day the closure books.
    pub fn absence_note(&self) -> String {
        format!("Company closure: {}", self.name)
    }
}
