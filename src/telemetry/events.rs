//! Arbitrary input accepted by telemetry sinks.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// What a telemetry callable returns. The no-op always yields `None`.
pub type CallResult = Option<Value>;

/// One invocation of a telemetry facility: positional plus keyword arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub args: Vec<Value>,
    pub kwargs: BTreeMap<String, Value>,
}

impl TelemetryCall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call addressed to a named function or attribute.
    pub fn named(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}
