//! Application state for the timekeeping API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, RulesConfig};

/// Shared application state.
///
/// Holds the working-time rules loaded at startup. Requests carry their own
/// data snapshot, so the rules are the only state shared between handlers.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RulesConfig>,
}

impl AppState {
    /// Creates a new application state from a configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self::from_rules(config.into_rules())
    }

    /// Creates a new application state from rules built in code.
    pub fn from_rules(rules: RulesConfig) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the working-time rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}
