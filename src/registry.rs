//! No-op registry: function names and stand-in modules bound to a sink.
//!
//! The registry is an explicit value handed back by the override routine.
//! Collaborators look names up here rather than relying on anything being
//! swapped out behind their backs.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{BindingKind, OverrideError};
use crate::telemetry::{CallResult, TelemetryCall, TelemetrySink};

/// Name of the canonical no-op callable.
pub const NOOP_FUNCTION: &str = "use_telemetry";

/// Function names bound to the no-op, canonical callable first.
pub const TELEMETRY_FUNCTIONS: [&str; 8] = [
    NOOP_FUNCTION,
    "track_event",
    "send_telemetry",
    "analytics_track",
    "report_usage",
    "log_telemetry",
    "collect_metrics",
    "send_metrics",
];

/// Module names replaced by a stand-in.
pub const TELEMETRY_MODULES: [&str; 6] = [
    "telemetry",
    "analytics",
    "usage_tracking",
    "metrics",
    "huggingface_hub.utils.telemetry",
    "transformers.utils.telemetry",
];

/// Placeholder for a telemetry module.
///
/// Every attribute lookup and every direct invocation resolves to the same
/// sink, so whatever a caller reaches for ends up inert.
#[derive(Clone)]
pub struct StandInModule {
    name: String,
    target: Arc<dyn TelemetrySink>,
}

impl StandInModule {
    pub fn new(name: impl Into<String>, target: Arc<dyn TelemetrySink>) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute access. The attribute name is ignored.
    pub fn attr(&self, _name: &str) -> Arc<dyn TelemetrySink> {
        Arc::clone(&self.target)
    }

    /// Direct invocation of the module object itself.
    pub fn invoke(&self, _call: &TelemetryCall) -> Arc<dyn TelemetrySink> {
        Arc::clone(&self.target)
    }

    /// Shorthand for `module.attr(name)(call)`.
    pub fn call_attr(&self, name: &str, call: &TelemetryCall) -> CallResult {
        self.attr(name).call(call)
    }
}

impl std::fmt::Debug for StandInModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandInModule")
            .field("name", &self.name)
            .field("noop", &self.target.is_noop())
            .finish()
    }
}

/// Name bindings produced by the override routine. Starts empty.
#[derive(Default, Clone)]
pub struct NoopRegistry {
    functions: BTreeMap<String, Arc<dyn TelemetrySink>>,
    modules: BTreeMap<String, StandInModule>,
}

impl NoopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every known function and module name to `sink`.
    ///
    /// Existing bindings under the same names are replaced, so binding twice
    /// leaves the registry as it was after the first call.
    pub fn bind_all(&mut self, sink: &Arc<dyn TelemetrySink>) {
        for name in TELEMETRY_FUNCTIONS {
            self.bind_function(name, Arc::clone(sink));
        }
        for name in TELEMETRY_MODULES {
            self.bind_module(StandInModule::new(name, Arc::clone(sink)));
        }
        log::debug!(
            "[Registry] bound {} functions and {} modules",
            self.functions.len(),
            self.modules.len()
        );
    }

    pub fn bind_function(&mut self, name: &str, sink: Arc<dyn TelemetrySink>) {
        self.functions.insert(name.to_string(), sink);
    }

    pub fn bind_module(&mut self, module: StandInModule) {
        self.modules.insert(module.name().to_string(), module);
    }

    pub fn function(&self, name: &str) -> Result<Arc<dyn TelemetrySink>, OverrideError> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| OverrideError::MissingBinding {
                name: name.to_string(),
                kind: BindingKind::Function,
            })
    }

    pub fn module(&self, name: &str) -> Result<&StandInModule, OverrideError> {
        self.modules
            .get(name)
            .ok_or_else(|| OverrideError::MissingBinding {
                name: name.to_string(),
                kind: BindingKind::Module,
            })
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.modules.is_empty()
    }
}

impl std::fmt::Debug for NoopRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoopRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
