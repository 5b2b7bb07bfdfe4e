//! Employee model.
//!
//! This module defines the Employee struct carrying the contract parameters
//! the accounting and compliance checks read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

fn default_true() -> bool {
    true
}

fn default_work_days() -> u8 {
    5
}

/// Represents an employee whose time is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Contracted weekly hours currently in force.
    pub weekly_hours: Decimal,
    /// Contracted working days per week (1 to 7).
    #[serde(default = "default_work_days")]
    pub work_days_per_week: u8,
    /// Annual vacation allowance in days.
    pub vacation_days: u32,
    /// Whether target/actual hours are accounted for this employee.
    #[serde(default = "default_true")]
    pub track_hours: bool,
    /// Whether the employee is classified as a night worker.
    #[serde(default)]
    pub is_night_worker: bool,
    /// Whether all working-time checks are skipped for this employee.
    #[serde(default)]
    pub exempt_from_regulation: bool,
}

impl Employee {
    /// Checks the record for values the engine cannot account with.
    ///
    /// # Examples
    ///
    /// ```
    /// use timekeeping_engine::models::Employee;
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
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.weekly_hours.is_sign_negative() {
            return Err(EngineError::InvalidEmployee {
                field: "weekly_hours".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if !(1..=7).contains(&self.work_days_per_week) {
            return Err(EngineError::InvalidEmployee {
                field: "work_days_per_week".to_string(),
                message: format!("must be between 1 and 7, got {}", self.work_days_per_week),
            });
        }
        Ok(())
    }
}
