//! Process-wide runtime state.
//!
//! The ABI is global-function-shaped, so the one live session lives in a
//! single `RuntimeState` behind internal mutexes: the lifecycle phase, the
//! event-loop proxy that control calls are marshalled through, and the
//! registered event callback. Phase transitions are
//! `Uninitialized -> Starting -> Running -> Closed`; control calls are
//! legal only in `Running`, and restart after `Closed` is rejected.

use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::Mutex;

use tracing::warn;
use winit::event_loop::EventLoopProxy;

use pywire_common::{Result, RuntimeError};

use crate::marshal::{reply_channel, Reply, ShellCommand};

/// Host callback receiving bridge events. Invoked only on the UI thread,
/// one invocation at a time, with a null-terminated UTF-8 payload that is
/// valid only for the duration of the call.
pub type EventCallback = extern "C" fn(*const c_char);

/// Lifecycle phase of the singleton runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimePhase {
    Uninitialized,
    Starting,
    Running,
    Closed,
}

/// Shared state threaded through every ABI entry point.
pub struct RuntimeState {
    phase: Mutex<RuntimePhase>,
    proxy: Mutex<Option<EventLoopProxy<ShellCommand>>>,
    on_event: Mutex<Option<EventCallback>>,
}

/// The one live runtime instance for this process.
pub(crate) static STATE: RuntimeState = RuntimeState::new();

impl RuntimeState {
    pub const fn new() -> Self {
        Self {
            phase: Mutex::new(RuntimePhase::Uninitialized),
            proxy: Mutex::new(None),
            on_event: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> RuntimePhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: RuntimePhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Transition `Uninitialized -> Starting`. Any other phase means a
    /// session was already started in this process; fail fast.
    pub fn begin_start(&self) -> Result<()> {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if *phase != RuntimePhase::Uninitialized {
            return Err(RuntimeError::AlreadyStarted);
        }
        *phase = RuntimePhase::Starting;
        Ok(())
    }

    /// Transition to `Running` once window and webview exist.
    pub fn mark_running(&self) {
        self.set_phase(RuntimePhase::Running);
    }

    /// Transition to `Closed` and drop the proxy and callback. In-flight
    /// marshalled calls observe the dropped replies and fail with
    /// `NotStarted`.
    pub fn mark_closed(&self) {
        self.set_phase(RuntimePhase::Closed);
        *self.proxy.lock().unwrap_or_else(|e| e.into_inner()) = None;
        *self.on_event.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn set_proxy(&self, proxy: EventLoopProxy<ShellCommand>) {
        *self.proxy.lock().unwrap_or_else(|e| e.into_inner()) = Some(proxy);
    }

    pub fn set_callback(&self, callback: Option<EventCallback>) {
        *self.on_event.lock().unwrap_or_else(|e| e.into_inner()) = callback;
    }

    /// Marshal a control call onto the UI thread and block until it
    /// completes. Legal only in `Running`.
    pub fn submit(&self, build: impl FnOnce(Reply) -> ShellCommand) -> Result<()> {
        if self.phase() != RuntimePhase::Running {
            return Err(RuntimeError::NotStarted);
        }
        let proxy = self
            .proxy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(RuntimeError::NotStarted)?;

        let (reply, ticket) = reply_channel();
        proxy
            .send_event(build(reply))
            .map_err(|_| RuntimeError::NotStarted)?;
        ticket.wait()
    }

    /// Deliver one bridge payload to the registered callback.
    ///
    /// Called from the UI thread only. The payload pointer handed to the
    /// callback is valid for the duration of the invocation.
    pub fn deliver_event(&self, payload: &str) {
        let callback = *self.on_event.lock().unwrap_or_else(|e| e.into_inner());
        let Some(callback) = callback else {
            return;
        };
        match CString::new(payload) {
            Ok(c_payload) => callback(c_payload.as_ptr()),
            Err(_) => {
                // Interior NUL cannot cross a null-terminated boundary.
                warn!(payload_len = payload.len(), "event payload dropped: contains NUL byte");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn fresh_state_is_uninitialized() {
        let state = RuntimeState::new();
        assert_eq!(state.phase(), RuntimePhase::Uninitialized);
    }

    #[test]
    fn begin_start_moves_to_starting() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        assert_eq!(state.phase(), RuntimePhase::Starting);
    }

    #[test]
    fn second_start_is_rejected() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        assert!(matches!(
            state.begin_start().unwrap_err(),
            RuntimeError::AlreadyStarted
        ));
    }

    #[test]
    fn start_while_running_is_rejected() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        state.mark_running();
        assert!(matches!(
            state.begin_start().unwrap_err(),
            RuntimeError::AlreadyStarted
        ));
    }

    #[test]
    fn restart_after_close_is_rejected() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        state.mark_running();
        state.mark_closed();
        assert_eq!(state.phase(), RuntimePhase::Closed);
        assert!(matches!(
            state.begin_start().unwrap_err(),
            RuntimeError::AlreadyStarted
        ));
    }

    #[test]
    fn submit_before_start_fails_without_building_a_command() {
        let state = RuntimeState::new();
        let built = AtomicBool::new(false);
        let err = state
            .submit(|reply| {
                built.store(true, Ordering::SeqCst);
                ShellCommand::SetTitle {
                    title: "x".into(),
                    reply,
                }
            })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotStarted));
        assert!(!built.load(Ordering::SeqCst));
    }

    #[test]
    fn submit_while_starting_fails() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        let err = state
            .submit(|reply| ShellCommand::Resize {
                width: 800,
                height: 600,
                reply,
            })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotStarted));
    }

    #[test]
    fn submit_after_close_fails() {
        let state = RuntimeState::new();
        state.begin_start().unwrap();
        state.mark_running();
        state.mark_closed();
        let err = state
            .submit(|reply| ShellCommand::EvaluateScript {
                script: "1 + 1".into(),
                reply,
            })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotStarted));
    }

    // Capture sink for callback tests. One test uses it to keep ordering
    // assertions isolated.
    static RECEIVED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    extern "C" fn capture(ptr: *const c_char) {
        let payload = unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned();
        RECEIVED.lock().unwrap().push(payload);
    }

    #[test]
    fn events_are_delivered_in_order_exactly_once() {
        let state = RuntimeState::new();
        state.set_callback(Some(capture));

        state.deliver_event(r#"{"type":"click","id":"btn1"}"#);
        state.deliver_event("second");
        // Interior NUL payloads are dropped, not truncated or crashed on.
        state.deliver_event("bad\0payload");
        state.deliver_event("third");

        let received = RECEIVED.lock().unwrap();
        assert_eq!(
            *received,
            vec![r#"{"type":"click","id":"btn1"}"#, "second", "third"]
        );
    }

    #[test]
    fn delivery_without_callback_is_a_no_op() {
        let state = RuntimeState::new();
        state.deliver_event("nobody listening");
    }

    #[test]
    fn mark_closed_unregisters_callback() {
        extern "C" fn must_not_run(_ptr: *const c_char) {
            panic!("callback invoked after close");
        }
        let state = RuntimeState::new();
        state.set_callback(Some(must_not_run));
        state.mark_closed();
        state.deliver_event("late event");
    }
}
