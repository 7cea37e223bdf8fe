//! WebView event types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the shell WebView.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    /// The page posted a message through the bridge
    /// (`window.pywire.postMessage`).
    Message { body: String },
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// The page requested a navigation.
    NavigationRequested { url: String },
}

/// Sink receiving [`ShellEvent`]s as they occur.
///
/// Invoked on the UI thread, one event at a time, in arrival order. The
/// sink must return promptly; delays here stall the page.
pub type EventSink = Arc<dyn Fn(ShellEvent) + Send + Sync>;

// =============================================================================
// TESTS
// =============================================================================
