// Telemetry Override - keeps an inference container from reporting usage
// Sets the well-known opt-out flags and hands out inert telemetry sinks

// Module declarations
pub mod config;
pub mod env;
pub mod error;
pub mod flags;
pub mod overrides;
pub mod registry;
pub mod telemetry;
pub mod verify;

// Re-exports for convenience
pub use config::TelemetryConfig;
pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::{ErrorCode, OverrideError};
pub use overrides::{apply, OverrideOutcome};
pub use registry::{NoopRegistry, StandInModule};
pub use telemetry::{NoopTelemetry, TelemetryCall, TelemetrySink};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber used by the binaries.
///
/// Honours `RUST_LOG`, defaulting to `warn` so stdout stays a clean report.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
