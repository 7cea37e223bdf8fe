//! Cross-thread call marshalling.
//!
//! Window and webview objects are UI-thread-affine, but the ABI allows
//! control calls from any thread. Each call becomes a `ShellCommand` sent
//! through the winit event-loop proxy, carrying a one-shot reply channel.
//! The UI thread performs the operation and completes the reply; the
//! originating thread blocks on its [`Ticket`] until then, preserving the
//! synchronous status-code contract.

use std::sync::mpsc;

use pywire_common::{Result, RuntimeError};

/// A marshalled control operation, serviced on the UI thread.
pub enum ShellCommand {
    /// Execute a script in the page context.
    EvaluateScript { script: String, reply: Reply },
    /// Replace the window title.
    SetTitle { title: String, reply: Reply },
    /// Set the client-area size in logical pixels.
    Resize { width: u32, height: u32, reply: Reply },
}

/// Completion side of a marshalled call. Held by the UI thread.
pub struct Reply {
    tx: mpsc::Sender<Result<()>>,
}

/// Waiting side of a marshalled call. Held by the originating thread.
pub struct Ticket {
    rx: mpsc::Receiver<Result<()>>,
}

/// Create a linked reply/ticket pair for one call.
pub fn reply_channel() -> (Reply, Ticket) {
    let (tx, rx) = mpsc::channel();
    (Reply { tx }, Ticket { rx })
}

impl Reply {
    /// Complete the call. Consumes the reply, so a command is answered
    /// exactly once.
    pub fn complete(self, result: Result<()>) {
        // The waiter may have gone away (process teardown); nothing to do.
        let _ = self.tx.send(result);
    }
}

impl Ticket {
    /// Block until the UI thread completes the call.
    ///
    /// If the event loop exits while the command is in flight, the reply
    /// is dropped and the call reports `NotStarted`.
    pub fn wait(self) -> Result<()> {
        self.rx.recv().unwrap_or(Err(RuntimeError::NotStarted))
    }
}

// =============================================================================
// TESTS
// =============================================================================
