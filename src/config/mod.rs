//! Configuration loading for working-time rules.
//!
//! This module provides functionality to load the statutory thresholds used
//! by the compliance checks (break minimums, hour ceilings, night window,
//! rest periods, compensatory rest windows) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use timekeeping_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/working_time.yaml").unwrap();
//! println!("Daily hard ceiling: {}h", config.rules().daily.hard_ceiling_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BreakRule, CompensatoryRestRule, DailyLimits, NightWindow, RestRule,
    RulesConfig, WeeklyLimits,
};
