//! The UI thread: window creation and the winit event loop.
//!
//! `ShellApp` implements `winit::application::ApplicationHandler` for the
//! session. `resumed` creates the window and the embedded webview;
//! `user_event` services marshalled control calls; window close exits the
//! loop and returns control to the `pw_start_app` caller.

use std::sync::{Arc, Mutex};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use pywire_common::{Result, RuntimeError};
use pywire_webview::{EventSink, ShellEvent, ShellWebView, WebViewConfig};

use crate::marshal::{Reply, ShellCommand};
use crate::params::ShellOptions;
use crate::state::STATE;

/// Per-session UI state. Lives on the thread that called `pw_start_app`.
pub(crate) struct ShellApp {
    options: ShellOptions,
    window: Option<Arc<Window>>,
    webview: Option<ShellWebView>,
    init_error: Option<RuntimeError>,
}

/// Run one shell session to completion. Blocks until the window closes.
pub(crate) fn run_shell(options: ShellOptions) -> Result<()> {
    STATE.begin_start()?;
    STATE.set_callback(options.on_event);

    let event_loop = match EventLoop::<ShellCommand>::with_user_event().build() {
        Ok(el) => el,
        Err(e) => {
            STATE.mark_closed();
            return Err(RuntimeError::Initialization(format!(
                "event loop creation failed: {e}"
            )));
        }
    };
    STATE.set_proxy(event_loop.create_proxy());

    let mut app = ShellApp::new(options);
    tracing::info!("Entering event loop");
    let run_result = event_loop.run_app(&mut app);

    // Closing drops the proxy; stragglers blocked in submit() observe
    // their dropped replies and fail with NotStarted.
    STATE.mark_closed();

    if let Some(err) = app.take_init_error() {
        return Err(err);
    }
    run_result.map_err(|e| RuntimeError::Initialization(format!("event loop error: {e}")))?;
    tracing::info!("Shell closed");
    Ok(())
}

impl ShellApp {
    fn new(options: ShellOptions) -> Self {
        Self {
            options,
            window: None,
            webview: None,
            init_error: None,
        }
    }

    fn take_init_error(&mut self) -> Option<RuntimeError> {
        self.init_error.take()
    }

    fn fail_init(&mut self, event_loop: &ActiveEventLoop, err: RuntimeError) {
        tracing::error!("{err}");
        self.init_error = Some(err);
        event_loop.exit();
    }

    /// Bounds covering the whole client area.
    fn full_bounds(size: PhysicalSize<u32>) -> wry::Rect {
        wry::Rect {
            position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
            size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
        }
    }

    /// Sink wiring webview events into the runtime. Bridge messages go to
    /// the registered host callback; the rest is logged.
    fn event_sink() -> EventSink {
        Arc::new(|event| match event {
            ShellEvent::Message { body } => STATE.deliver_event(&body),
            ShellEvent::PageLoad { state, url } => {
                tracing::debug!(?state, url = %url, "page load");
            }
            ShellEvent::TitleChanged { title } => {
                tracing::debug!(title = %title, "document title changed");
            }
            ShellEvent::NavigationRequested { url } => {
                tracing::debug!(url = %url, "navigation");
            }
        })
    }

    /// Execute a script and complete the reply once the engine finishes it.
    fn run_script(&self, script: String, reply: Reply) {
        let webview = match &self.webview {
            Some(wv) => wv,
            None => {
                reply.complete(Err(RuntimeError::NotStarted));
                return;
            }
        };

        let slot = Arc::new(Mutex::new(Some(reply)));
        let done = Arc::clone(&slot);
        let submitted = webview.evaluate_script(&script, move || {
            if let Some(reply) = done.lock().ok().and_then(|mut s| s.take()) {
                reply.complete(Ok(()));
            }
        });

        if let Err(e) = submitted {
            if let Some(reply) = slot.lock().ok().and_then(|mut s| s.take()) {
                reply.complete(Err(RuntimeError::ScriptExecution(e.to_string())));
            }
        }
    }
}

impl ApplicationHandler<ShellCommand> for ShellApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(&self.options.title)
            .with_inner_size(LogicalSize::new(
                self.options.width as f64,
                self.options.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail_init(
                    event_loop,
                    RuntimeError::Initialization(format!("window creation failed: {e}")),
                );
                return;
            }
        };

        let bounds = Self::full_bounds(window.inner_size());
        let config = WebViewConfig::with_url(self.options.url.as_str());
        let webview =
            match ShellWebView::create(window.as_ref(), bounds, config, Self::event_sink()) {
                Ok(wv) => wv,
                Err(e) => {
                    self.fail_init(
                        event_loop,
                        RuntimeError::Initialization(format!("webview creation failed: {e}")),
                    );
                    return;
                }
            };

        if let Err(e) = webview.focus() {
            tracing::warn!("Failed to focus webview: {e}");
        }

        tracing::info!(
            title = %self.options.title,
            url = %webview.current_url(),
            width = self.options.width,
            height = self.options.height,
            "Shell window created"
        );

        self.window = Some(window);
        self.webview = Some(webview);
        STATE.mark_running();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(ref wv) = self.webview {
                        if let Err(e) = wv.set_bounds(Self::full_bounds(size)) {
                            tracing::warn!("Failed to update webview bounds: {e}");
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, command: ShellCommand) {
        match command {
            ShellCommand::EvaluateScript { script, reply } => {
                self.run_script(script, reply);
            }

            ShellCommand::SetTitle { title, reply } => match &self.window {
                Some(window) => {
                    window.set_title(&title);
                    reply.complete(Ok(()));
                }
                None => reply.complete(Err(RuntimeError::NotStarted)),
            },

            ShellCommand::Resize { width, height, reply } => match &self.window {
                Some(window) => {
                    // The webview follows in the Resized window event.
                    let _ = window.request_inner_size(LogicalSize::new(
                        width as f64,
                        height as f64,
                    ));
                    reply.complete(Ok(()));
                }
                None => reply.complete(Err(RuntimeError::NotStarted)),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
