//! The exported C ABI.
//!
//! All control functions return an integer status code
//! (`pywire_common::status`); no panic ever unwinds across the boundary.
//! `pw_version` is the ABI handshake the host checks before binding the
//! rest of the symbols, so its signature never changes.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Once;

use tracing_subscriber::EnvFilter;

use pywire_common::{status, Result, RuntimeError};

use crate::app::run_shell;
use crate::marshal::ShellCommand;
use crate::params::{InitParams, ShellOptions};
use crate::state::STATE;

static LOG_INIT: Once = Once::new();

/// Install the tracing subscriber once per process. Tolerates a host that
/// already installed its own.
fn init_logging() {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::from_default_env();
        let filter = match "pywire=info".parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        };
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Read a required text argument. Null and non-UTF-8 are InvalidParameter.
///
/// # Safety
///
/// A non-null `ptr` must point to a valid null-terminated C string.
unsafe fn required_text(ptr: *const c_char, name: &str) -> Result<String> {
    if ptr.is_null() {
        return Err(RuntimeError::InvalidParameter(format!("{name} is null")));
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(RuntimeError::InvalidParameter(format!(
            "{name} is not valid UTF-8"
        ))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// Static semantic version of the runtime build. Identical across calls
/// within a process.
#[no_mangle]
pub extern "C" fn pw_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Create the window and webview, then pump the UI event loop.
///
/// Blocks the calling thread until the window is closed. Returns 0 on
/// normal close; a negative status on initialization failure or when a
/// session was already started in this process.
#[no_mangle]
pub extern "C" fn pw_start_app(params: InitParams) -> i32 {
    init_logging();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let options = unsafe { ShellOptions::from_params(&params) }?;
        tracing::info!(
            title = %options.title,
            url = %options.url,
            width = options.width,
            height = options.height,
            "Starting shell session"
        );
        run_shell(options)
    }));

    let result = match outcome {
        Ok(result) => result,
        Err(payload) => {
            STATE.mark_closed();
            tracing::error!("UI loop panicked: {}", panic_message(payload.as_ref()));
            Err(RuntimeError::Initialization("panic in UI loop".into()))
        }
    };
    status::status_code(&result)
}

/// Execute a UTF-8 script inside the webview's JavaScript context.
///
/// Callable from any thread; blocks until the script has run. Fails with
/// NotStarted unless the runtime is Running.
#[no_mangle]
pub extern "C" fn pw_execute_javascript(script: *const c_char) -> i32 {
    let result = unsafe { required_text(script, "script") }
        .and_then(|script| STATE.submit(|reply| ShellCommand::EvaluateScript { script, reply }));
    status::status_code(&result)
}

/// Replace the window title. Unicode-safe.
#[no_mangle]
pub extern "C" fn pw_set_title(title: *const c_char) -> i32 {
    let result = unsafe { required_text(title, "title") }
        .and_then(|title| STATE.submit(|reply| ShellCommand::SetTitle { title, reply }));
    status::status_code(&result)
}

/// Set the client-area size in logical pixels. Zero dimensions are
/// rejected rather than forwarded to the window.
#[no_mangle]
pub extern "C" fn pw_resize_window(width: u32, height: u32) -> i32 {
    let result = if width == 0 || height == 0 {
        Err(RuntimeError::InvalidParameter(
            "dimensions must be non-zero".into(),
        ))
    } else {
        STATE.submit(|reply| ShellCommand::Resize {
            width,
            height,
            reply,
        })
    };
    status::status_code(&result)
}

// =============================================================================
// TESTS
// =============================================================================
