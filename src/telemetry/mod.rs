//! Telemetry sinks injected into collaborators.
//!
//! Code that would report usage takes an `Arc<dyn TelemetrySink>` instead of
//! importing a telemetry facility directly. `TelemetryConfig::sink` decides
//! which implementation is handed out; once any disable flag is active that
//! is always the shared no-op.

use std::sync::Arc;

use once_cell::sync::Lazy;

pub mod events;

pub use events::{CallResult, TelemetryCall};

/// Anything a caller might reach for to record telemetry.
pub trait TelemetrySink: Send + Sync {
    fn call(&self, call: &TelemetryCall) -> CallResult;

    /// Whether invoking this sink can have any effect at all.
    fn is_noop(&self) -> bool {
        false
    }
}

/// Accepts any input, does nothing, returns nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn call(&self, _call: &TelemetryCall) -> CallResult {
        None
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Process-wide no-op shared by every binding.
static NOOP: Lazy<Arc<dyn TelemetrySink>> = Lazy::new(|| Arc::new(NoopTelemetry));

/// Access the shared no-op sink.
pub fn noop() -> Arc<dyn TelemetrySink> {
    Arc::clone(&NOOP)
}

/// Convenience wrapper around the shared no-op, mirroring a free function
/// that callers can invoke with any arguments.
pub fn use_telemetry(call: &TelemetryCall) -> CallResult {
    NOOP.call(call)
}

/// Local-only sink used while telemetry is not disabled.
///
/// Calls are written to the debug log as JSON. Nothing leaves the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTelemetry;

impl TelemetrySink for LoggingTelemetry {
    fn call(&self, call: &TelemetryCall) -> CallResult {
        match serde_json::to_string(call) {
            Ok(json) => log::debug!("[Telemetry] {}", json),
            Err(err) => log::warn!("[Telemetry] unserializable call: {}", err),
        }
        None
    }
}
