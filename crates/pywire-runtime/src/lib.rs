//! Native shell runtime behind the PyWire host binding.
//!
//! Creates one OS window with an embedded webview, pumps the UI event loop
//! on the thread that calls [`pw_start_app`], and exposes the `pw_*` C ABI
//! the host loader binds. The runtime is a process-wide singleton: control
//! calls (`pw_execute_javascript`, `pw_set_title`, `pw_resize_window`) may
//! come from any thread and are marshalled onto the UI thread, blocking the
//! caller until the UI thread completes the operation.

mod app;
mod ffi;
mod marshal;
mod params;
mod state;

pub use ffi::{pw_execute_javascript, pw_resize_window, pw_set_title, pw_start_app, pw_version};
pub use params::InitParams;
pub use state::EventCallback;
