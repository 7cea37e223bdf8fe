//! Page -> host message bridge.
//!
//! An initialization script injected into every page exposes
//! `window.pywire.postMessage(text)`. Each call forwards one text payload
//! through the webview's IPC channel to the `ipc_handler` registered on
//! the WebView, which hands it to the runtime's event sink. Messages cross
//! the boundary exactly once, in posting order, on the UI thread.

/// JavaScript snippet that sets up the bridge on the JS side.
/// Injected as an initialization script into every page.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    // PyWire shell bridge
    window.pywire = window.pywire || {};
    window.pywire.postMessage = function(msg) {
        window.ipc.postMessage(String(msg));
    };
})();
"#;

// =============================================================================
// TESTS
// =============================================================================
