/// Configuration for the shell's embedded WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load. `None` renders a blank page.
    pub url: Option<String>,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
    /// Whether to enable autoplay for media.
    pub autoplay: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("PyWireShell/{}", env!("CARGO_PKG_VERSION"))),
            clipboard: true,
            autoplay: true,
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// The URL this config resolves to (`about:blank` when unset).
    pub fn initial_url(&self) -> &str {
        self.url.as_deref().unwrap_or("about:blank")
    }
}

// =============================================================================
// TESTS
// =============================================================================
