// Error types for the telemetry override routines
//
// Two kinds exist: a registry lookup made before the override ran, and an
// environment variable that does not hold the enabled value. Neither is
// recovered automatically; both are reported.

use log::error;
use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Override error code constants
///
/// Error code range: 3001-3002
pub struct OverrideErrorCodes {}

impl OverrideErrorCodes {
    /// A function or stand-in module was looked up before it was bound
    pub const MISSING_BINDING: i32 = 3001;

    /// An environment variable is absent or does not hold the enabled value
    pub const VERIFICATION_MISMATCH: i32 = 3002;
}

/// What kind of name a missing binding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Function,
    Module,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Function => f.write_str("function"),
            BindingKind::Module => f.write_str("module"),
        }
    }
}

/// Log an override error with structured context
pub fn log_override_error(err: &OverrideError, context: &str) {
    error!(
        "Override error in {}: code={}, component=TelemetryOverride, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors surfaced by the override registry and the verifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideError {
    /// Name looked up in a registry the override routine has not populated
    MissingBinding { name: String, kind: BindingKind },

    /// Variable absent or holding something other than the enabled value
    VerificationMismatch {
        name: String,
        expected: String,
        actual: Option<String>,
    },
}

impl ErrorCode for OverrideError {
    fn code(&self) -> i32 {
        match self {
            OverrideError::MissingBinding { .. } => OverrideErrorCodes::MISSING_BINDING,
            OverrideError::VerificationMismatch { .. } => {
                OverrideErrorCodes::VERIFICATION_MISMATCH
            }
        }
    }

    fn message(&self) -> String {
        match self {
            OverrideError::MissingBinding { name, kind } => {
                format!("{} {} not found", name, kind)
            }
            OverrideError::VerificationMismatch {
                name,
                expected,
                actual,
            } => match actual {
                Some(value) => format!("{} = {} (should be '{}')", name, value, expected),
                None => format!("{} = <unset> (should be '{}')", name, expected),
            },
        }
    }
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for OverrideError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_error_codes() {
        assert_eq!(
            OverrideError::MissingBinding {
                name: "telemetry".to_string(),
                kind: BindingKind::Module,
            }
            .code(),
            OverrideErrorCodes::MISSING_BINDING
        );
        assert_eq!(
            OverrideError::VerificationMismatch {
                name: "DO_NOT_TRACK".to_string(),
                expected: "1".to_string(),
                actual: None,
            }
            .code(),
            OverrideErrorCodes::VERIFICATION_MISMATCH
        );
    }

    #[test]
    fn test_override_error_messages() {
        let err = OverrideError::MissingBinding {
            name: "use_telemetry".to_string(),
            kind: BindingKind::Function,
        };
        assert_eq!(err.message(), "use_telemetry function not found");

        let err = OverrideError::VerificationMismatch {
            name: "DO_NOT_TRACK".to_string(),
            expected: "1".to_string(),
            actual: Some("0".to_string()),
        };
        assert_eq!(err.to_string(), "DO_NOT_TRACK = 0 (should be '1')");

        let err = OverrideError::VerificationMismatch {
            name: "NO_ANALYTICS".to_string(),
            expected: "1".to_string(),
            actual: None,
        };
        assert!(err.message().contains("<unset>"));
    }
}
