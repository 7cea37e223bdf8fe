//! Runtime error taxonomy.
//!
//! Every fallible operation in the runtime returns `RuntimeError`; the ABI
//! layer is the only place these are flattened into integer status codes
//! (see [`crate::status`]). One variant per documented failure condition;
//! a non-zero code always means one specific thing.

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A control call arrived while the runtime was not in the `Running`
    /// phase: before `pw_start_app`, or after the window closed.
    #[error("runtime not started")]
    NotStarted,

    /// `pw_start_app` was called while a session was starting, running,
    /// or already closed. Restart is unsupported.
    #[error("runtime already started")]
    AlreadyStarted,

    /// Event loop, window, or webview creation failed, or the UI loop
    /// panicked.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// Null pointer, non-UTF-8 text, or degenerate dimensions.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The webview rejected a submitted script.
    #[error("script execution failed: {0}")]
    ScriptExecution(String),
}

// =============================================================================
// TESTS
// =============================================================================
