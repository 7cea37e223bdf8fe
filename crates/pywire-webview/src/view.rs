//! The shell WebView: creation, handler wiring, and the handle used by
//! the runtime to drive it.

use std::sync::Mutex;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::config::WebViewConfig;
use crate::events::{EventSink, PageLoadState, ShellEvent};
use crate::ipc::BRIDGE_INIT_SCRIPT;

/// Handle to the shell's single WebView instance.
///
/// All methods must be called on the UI thread that created it.
pub struct ShellWebView {
    webview: WebView,
    current_url: String,
}

impl ShellWebView {
    /// Create the WebView as a child of the given window, filling `bounds`.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// Events flow to `sink` on the UI thread, in arrival order.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
        sink: EventSink,
    ) -> Result<Self, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_initialization_script(BRIDGE_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua.as_str());
        }

        builder = attach_ipc_handler(builder, sink.clone());
        builder = attach_page_load_handler(builder, sink.clone());
        builder = attach_title_handler(builder, sink.clone());
        builder = attach_navigation_handler(builder, sink);

        let initial_url = config.initial_url().to_string();
        builder = match &config.url {
            Some(url) => builder.with_url(url.as_str()),
            None => builder.with_html("<html><body></body></html>"),
        };

        let webview = builder.build_as_child(window)?;
        debug!(url = %initial_url, "WebView created");

        Ok(Self {
            webview,
            current_url: initial_url,
        })
    }

    /// The URL the WebView was created with (best-effort tracking).
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Execute JavaScript in the page context.
    ///
    /// `on_complete` fires once the script has run to completion inside
    /// the engine. A submission error is returned immediately and
    /// `on_complete` never fires.
    pub fn evaluate_script<F>(&self, js: &str, on_complete: F) -> Result<(), wry::Error>
    where
        F: FnOnce() + Send + 'static,
    {
        // wry wants Fn; the slot guarantees the FnOnce fires at most once.
        let slot = Mutex::new(Some(on_complete));
        self.webview.evaluate_script_with_callback(js, move |_result| {
            if let Some(f) = slot.lock().ok().and_then(|mut s| s.take()) {
                f();
            }
        })
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Focus the WebView.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn attach_ipc_handler(builder: WebViewBuilder<'_>, sink: EventSink) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();
        debug!(body_len = body.len(), "bridge message from page");
        sink(ShellEvent::Message { body });
    })
}

fn attach_page_load_handler(builder: WebViewBuilder<'_>, sink: EventSink) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        sink(ShellEvent::PageLoad { state, url });
    })
}

fn attach_title_handler(builder: WebViewBuilder<'_>, sink: EventSink) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "document title changed");
        sink(ShellEvent::TitleChanged { title });
    })
}

fn attach_navigation_handler(builder: WebViewBuilder<'_>, sink: EventSink) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if url.starts_with("javascript:") {
            warn!(url = %url, "navigation blocked");
            return false;
        }
        debug!(url = %url, "navigation");
        sink(ShellEvent::NavigationRequested { url });
        true
    })
}

// =============================================================================
// TESTS
// =============================================================================
