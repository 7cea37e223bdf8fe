//! Integer status codes returned across the C ABI.
//!
//! The boundary is a C-compatible ABI with no exception propagation, so
//! every control function returns one of these codes. Codes are global:
//! the same value means the same condition regardless of which entry point
//! returned it.

use crate::errors::RuntimeError;

/// Operation completed normally.
pub const OK: i32 = 0;
/// Null pointer, non-UTF-8 text, or degenerate dimensions.
pub const INVALID_PARAMETER: i32 = -1;
/// Runtime not in the `Running` phase.
pub const NOT_STARTED: i32 = -2;
/// `pw_start_app` called more than once in a process.
pub const ALREADY_STARTED: i32 = -3;
/// Window, webview, or event loop creation failed.
pub const INITIALIZATION_FAILED: i32 = -4;
/// The webview rejected a submitted script.
pub const SCRIPT_EXECUTION_FAILED: i32 = -5;

/// Flatten a runtime result into its ABI status code.
pub fn status_code(result: &crate::Result<()>) -> i32 {
    match result {
        Ok(()) => OK,
        Err(RuntimeError::InvalidParameter(_)) => INVALID_PARAMETER,
        Err(RuntimeError::NotStarted) => NOT_STARTED,
        Err(RuntimeError::AlreadyStarted) => ALREADY_STARTED,
        Err(RuntimeError::Initialization(_)) => INITIALIZATION_FAILED,
        Err(RuntimeError::ScriptExecution(_)) => SCRIPT_EXECUTION_FAILED,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_maps_to_zero() {
        assert_eq!(status_code(&Ok(())), OK);
    }

    #[test]
    fn each_error_has_a_distinct_code() {
        let errors = [
            RuntimeError::InvalidParameter("x".into()),
            RuntimeError::NotStarted,
            RuntimeError::AlreadyStarted,
            RuntimeError::Initialization("x".into()),
            RuntimeError::ScriptExecution("x".into()),
        ];
        let mut codes: Vec<i32> = errors.into_iter().map(|e| status_code(&Err(e))).collect();
        codes.push(OK);
        let before = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), before, "status codes must not collide");
    }

    #[test]
    fn failure_codes_are_negative() {
        for err in [
            RuntimeError::InvalidParameter("x".into()),
            RuntimeError::NotStarted,
            RuntimeError::AlreadyStarted,
            RuntimeError::Initialization("x".into()),
            RuntimeError::ScriptExecution("x".into()),
        ] {
            assert!(status_code(&Err(err)) < 0);
        }
    }

    #[test]
    fn documented_values_are_stable() {
        // These values are part of the ABI contract with the host binding.
        assert_eq!(OK, 0);
        assert_eq!(INVALID_PARAMETER, -1);
        assert_eq!(NOT_STARTED, -2);
        assert_eq!(ALREADY_STARTED, -3);
        assert_eq!(INITIALIZATION_FAILED, -4);
        assert_eq!(SCRIPT_EXECUTION_FAILED, -5);
    }
}
