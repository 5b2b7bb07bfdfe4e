//! Error types for the timekeeping engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while accounting hours or
//! gating shift writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable codes for hard rejections of a shift write.
///
/// The serialized form is the SCREAMING_SNAKE code that API consumers match on.
///
/// # Example
///
/// ```
/// use timekeeping_engine::error::RejectionCode;
///
/// assert_eq!(RejectionCode::BreakTooShort.as_str(), "BREAK_TOO_SHORT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    /// End time is not after start time.
    InvalidTimeRange,
    /// More than six hours of net work with less than the minimum break.
    BreakTooShort,
    /// Daily hours would exceed the hard ceiling.
    DailyHoursExceeded,
    /// A shift with the same (employee, date, start) already exists.
    DuplicateShift,
    /// The employee already has a shift without an end time.
    OpenShiftExists,
}

impl RejectionCode {
    /// Returns the stable code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionCode::InvalidTimeRange => "INVALID_TIME_RANGE",
            RejectionCode::BreakTooShort => "BREAK_TOO_SHORT",
            RejectionCode::DailyHoursExceeded => "DAILY_HOURS_EXCEEDED",
            RejectionCode::DuplicateShift => "DUPLICATE_SHIFT",
            RejectionCode::OpenShiftExists => "OPEN_SHIFT_EXISTS",
        }
    }
}

impl std::fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for the timekeeping engine.
///
/// All fallible operations in the engine return this error type, including
/// failures reported by an [`EntryStore`](crate::store::EntryStore)
/// implementation.
///
/// # Example
///
/// ```
/// use timekeeping_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/working_time.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/working_time.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift was malformed or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A year/month pair did not describe a calendar month.
    #[error("Invalid period {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An absence booking could not be expanded into any working day.
    #[error("Invalid absence from {start} to {end}: {message}")]
    InvalidAbsence {
        /// First requested day.
        start: NaiveDate,
        /// Last requested day.
        end: NaiveDate,
        /// A description of the problem.
        message: String,
    },

    /// A shift write was rejected by a working-time rule.
    #[error("Shift rejected ({code}): {message}")]
    ShiftRejected {
        /// Stable rejection code.
        code: RejectionCode,
        /// Human-readable explanation including the measured values.
        message: String,
    },

    /// A store uniqueness constraint was violated.
    #[error("Duplicate {entity}: {key}")]
    DuplicateEntry {
        /// The kind of record (e.g. "absence").
        entity: String,
        /// The conflicting key.
        key: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record.
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::ShiftRejected`] from a code and message.
    pub fn rejected(code: RejectionCode, message: impl Into<String>) -> Self {
        EngineError::ShiftRejected {
            code,
            message: message.into(),
        }
    }

    /// Returns the rejection code if this error is a hard rejection.
    pub fn rejection_code(&self) -> Option<RejectionCode> {
        match self {
            EngineError::ShiftRejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
