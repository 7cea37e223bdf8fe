//! Webview engine wrapper for the PyWire shell runtime.
//!
//! Wraps the `wry` crate to provide:
//! - A single managed WebView filling the shell window
//! - The page -> host message bridge (`window.pywire.postMessage`)
//! - Page lifecycle events (load, title change, navigation)
//! - Script execution with completion notification

pub mod config;
pub mod events;
pub mod ipc;
pub mod view;

pub use config::WebViewConfig;
pub use events::{EventSink, PageLoadState, ShellEvent};
pub use view::ShellWebView;
