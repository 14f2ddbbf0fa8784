//! Override setter: write the flag mapping and bind every telemetry name to
//! the no-op.

use crate::config::TelemetryConfig;
use crate::env::EnvStore;
use crate::flags::{self, FlagAssignment};
use crate::registry::NoopRegistry;
use crate::telemetry;

/// Everything the override routine produced.
#[derive(Debug, Clone)]
pub struct OverrideOutcome {
    /// Assignments written, in mapping order
    pub assignments: Vec<FlagAssignment>,
    pub registry: NoopRegistry,
    /// Configuration read back after the writes
    pub config: TelemetryConfig,
}

impl OverrideOutcome {
    /// Lines printed by the override binary, in order.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .assignments
            .iter()
            .map(|assignment| format!("Set {}", assignment))
            .collect();
        lines.push("Telemetry has been completely disabled".to_string());
        lines.push("Telemetry imports have been patched".to_string());
        lines
    }
}

/// Write every variable of the flag mapping, overwriting prior values.
pub fn disable_telemetry(env: &mut dyn EnvStore) -> Vec<FlagAssignment> {
    let mut written = Vec::with_capacity(flags::TELEMETRY_ENV_VARS.len());
    for assignment in flags::flag_mapping() {
        env.set(assignment.name, assignment.value);
        log::debug!("[Override] set {}", assignment);
        written.push(assignment);
    }
    written
}

/// Bind every known telemetry function and module to the shared no-op.
///
/// Independent of configuration: `TelemetryConfig::sink` is for collaborators,
/// the registry only ever holds the no-op.
pub fn patch_bindings() -> NoopRegistry {
    let mut registry = NoopRegistry::new();
    registry.bind_all(&telemetry::noop());
    registry
}

/// Run the full override: environment first, then bindings.
///
/// Cannot fail. Running it again yields the same environment and bindings.
pub fn apply(env: &mut dyn EnvStore) -> OverrideOutcome {
    let assignments = disable_telemetry(env);
    let config = TelemetryConfig::from_env(env);
    let registry = patch_bindings();
    log::info!(
        "[Override] {} variables written, collaborator sink is no-op: {}",
        assignments.len(),
        !config.telemetry_enabled()
    );
    OverrideOutcome {
        assignments,
        registry,
        config,
    }
}
