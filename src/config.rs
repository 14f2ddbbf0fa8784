//! Telemetry configuration resolved once at process start
//!
//! The environment is read a single time into a `TelemetryConfig`, which is
//! then passed to whatever needs to know whether telemetry may run. Nothing
//! downstream consults the environment on its own.

use std::sync::Arc;

use crate::env::EnvStore;
use crate::flags::{self, TELEMETRY_ENV_VARS};
use crate::telemetry::{self, LoggingTelemetry, TelemetrySink};

/// Resolved telemetry settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Disable flags found set to the enabled value, in mapping order
    pub active_flags: Vec<String>,
}

impl TelemetryConfig {
    /// Build configuration from the given environment
    pub fn from_env(env: &dyn EnvStore) -> Self {
        let active_flags: Vec<String> = TELEMETRY_ENV_VARS
            .iter()
            .filter(|name| flags::is_enabled(env.get(name).as_deref()))
            .map(|name| name.to_string())
            .collect();

        if active_flags.is_empty() {
            log::info!("[Config] No telemetry disable flags set");
        } else {
            log::info!(
                "[Config] Telemetry disabled by {} flag(s): {}",
                active_flags.len(),
                active_flags.join(", ")
            );
        }

        Self { active_flags }
    }

    /// Any single disable flag turns telemetry off.
    pub fn telemetry_enabled(&self) -> bool {
        self.active_flags.is_empty()
    }

    /// Whether every flag of the mapping is active
    pub fn fully_disabled(&self) -> bool {
        self.active_flags.len() == TELEMETRY_ENV_VARS.len()
    }

    /// Sink handed to collaborators that want to record telemetry
    pub fn sink(&self) -> Arc<dyn TelemetrySink> {
        if self.telemetry_enabled() {
            Arc::new(LoggingTelemetry)
        } else {
            telemetry::noop()
        }
    }
}
