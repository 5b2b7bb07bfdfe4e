//! Configuration types for working-time rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML rules file. Every section has a
//! `Default` carrying the statutory value, so a partial file only needs
//! to name what it overrides.

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum break rule: more than `threshold_minutes` of net work
/// requires at least `minimum_minutes` of break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakRule {
    /// Net work minutes above which the break is required.
    pub threshold_minutes: i64,
    /// Minimum effective break in minutes.
    pub minimum_minutes: i64,
}

impl Default for BreakRule {
    fn default() -> Self {
        Self {
            threshold_minutes: 360,
            minimum_minutes: 30,
        }
    }
}

/// Daily hour ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyLimits {
    /// Above this many hours a non-blocking warning is attached.
    pub soft_ceiling_hours: Decimal,
    /// Above this many hours the write is rejected.
    pub hard_ceiling_hours: Decimal,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            soft_ceiling_hours: Decimal::from(8),
            hard_ceiling_hours: Decimal::from(10),
        }
    }
}

/// Weekly hour ceiling (Monday to Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyLimits {
    /// Above this many hours a non-blocking warning is attached.
    pub soft_ceiling_hours: Decimal,
}

impl Default for WeeklyLimits {
    fn default() -> Self {
        Self {
            soft_ceiling_hours: Decimal::from(48),
        }
    }
}

/// Night-work window and classification threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightWindow {
    /// Start of the night window (on the shift's day).
    pub window_start: NaiveTime,
    /// End of the night window (on the following day when before the start).
    pub window_end: NaiveTime,
    /// A shift is night work when its overlap strictly exceeds this.
    pub minimum_overlap_minutes: i64,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            window_start: NaiveTime::MIN + Duration::hours(23),
            window_end: NaiveTime::MIN + Duration::hours(6),
            minimum_overlap_minutes: 120,
        }
    }
}

/// Minimum rest between two working days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestRule {
    /// Minimum uninterrupted rest in hours.
    pub minimum_hours: Decimal,
}

impl Default for RestRule {
    fn default() -> Self {
        Self {
            minimum_hours: Decimal::from(11),
        }
    }
}

/// Windows in which a free day must follow Sunday or holiday work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensatoryRestRule {
    /// Days after a worked Sunday.
    pub sunday_window_days: i64,
    /// Days after a worked holiday.
    pub holiday_window_days: i64,
}

impl Default for CompensatoryRestRule {
    fn default() -> Self {
        Self {
            sunday_window_days: 14,
            holiday_window_days: 56,
        }
    }
}

impl CompensatoryRestRule {
    /// The longest window, used to widen store queries past a year end.
    pub fn longest_window_days(&self) -> i64 {
        self.sunday_window_days.max(self.holiday_window_days)
    }
}

/// The complete rules configuration.
///
/// # Example
///
/// ```
/// use timekeeping_engine::config::RulesConfig;
/// use rust_decimal::Decimal;
///
/// let rules = RulesConfig::default();
/// assert_eq!(rules.daily.hard_ceiling_hours, Decimal::from(10));
/// assert_eq!(rules.rest.minimum_hours, Decimal::from(11));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Minimum break rule.
    pub breaks: BreakRule,
    /// Daily ceilings.
    pub daily: DailyLimits,
    /// Weekly ceiling.
    pub weekly: WeeklyLimits,
    /// Night-work classification.
    pub night: NightWindow,
    /// Minimum inter-shift rest.
    pub rest: RestRule,
    /// Compensatory rest windows.
    pub compensatory_rest: CompensatoryRestRule,
}
