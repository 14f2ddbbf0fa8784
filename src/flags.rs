//! Fixed flag mapping written by the override setter.
//!
//! Every entry pairs a well-known environment variable with the literal
//! enabled value. Order is significant: reports list variables in the order
//! they appear here.

/// Literal value that switches a disable flag on.
pub const ENABLED_VALUE: &str = "1";

/// Every variable the override setter writes.
pub const TELEMETRY_ENV_VARS: [&str; 9] = [
    "HF_HUB_DISABLE_TELEMETRY",
    "DO_NOT_TRACK",
    "DISABLE_TELEMETRY",
    "TELEMETRY_DISABLED",
    "NO_ANALYTICS",
    "ANALYTICS_DISABLED",
    "HUGGINGFACE_HUB_DISABLE_TELEMETRY",
    "TRANSFORMERS_OFFLINE",
    "TORCH_TELEMETRY_DISABLED",
];

/// Subset read back by the quick verifier.
pub const QUICK_CHECK_VARS: [&str; 4] = [
    "HF_HUB_DISABLE_TELEMETRY",
    "DO_NOT_TRACK",
    "DISABLE_TELEMETRY",
    "TELEMETRY_DISABLED",
];

/// A single `(name, value)` assignment from the flag mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagAssignment {
    pub name: &'static str,
    pub value: &'static str,
}

impl std::fmt::Display for FlagAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The complete flag mapping in declaration order.
pub fn flag_mapping() -> impl Iterator<Item = FlagAssignment> {
    TELEMETRY_ENV_VARS.iter().map(|&name| FlagAssignment {
        name,
        value: ENABLED_VALUE,
    })
}

/// Whether a raw environment value counts as "enabled".
pub fn is_enabled(value: Option<&str>) -> bool {
    value == Some(ENABLED_VALUE)
}
