//! # Lifecycle events emitted by the host session controller and coordinator.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Session events**: startup, command-line assembly, runtime attach, teardown
//! - **Rebirth events**: restart/force-quit transitions and the relaunch itself
//! - **Filtering events**: stale signals and ignored requests
//! - **Subscriber events**: overflow and panics in subscriber workers
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! runtime identity involved, reasons and argument lists.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use hostvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RequestIgnored)
//!     .with_reason("restart already pending");
//!
//! assert_eq!(ev.kind, EventKind::RequestIgnored);
//! assert_eq!(ev.reason.as_deref(), Some("restart already pending"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::session::{RuntimeIdentity, SessionState};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: subscriber name and panic info
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: subscriber name and drop reason
    SubscriberOverflow,

    // === Session events ===
    /// OS termination signal observed (or the host token was cancelled).
    ShutdownRequested,

    /// The session left `Init` and is running.
    ///
    /// Sets:
    /// - `args`: assembled command line
    SessionStarted,

    /// The bundled command-line file could not be used; its contribution is empty.
    ///
    /// Sets:
    /// - `reason`: read or parse failure
    CommandLineFallback,

    /// A new embedded view and runtime were created and attached.
    ///
    /// Sets:
    /// - `runtime`: identity of the new runtime
    RuntimeCreated,

    /// An existing embedded view was found and its runtime adopted.
    ///
    /// Sets:
    /// - `runtime`: identity of the adopted runtime
    RuntimeReused,

    /// The session released its view and identity (passive teardown).
    SessionDestroyed,

    // === Rebirth events ===
    /// A descriptor with the new-launch flag reached a running session.
    NewLaunchRequested,

    /// A brand-new runtime instance was requested in a fresh process.
    ///
    /// Sets:
    /// - `args`: requested arguments
    NewInstanceRequested,

    /// Session entered `RestartPending`; runtime shutdown was requested.
    ///
    /// Sets:
    /// - `runtime`: runtime asked to shut down (if any)
    /// - `args`: command-line params of the relaunch descriptor
    RestartPending,

    /// Session entered `ForceQuitPending`.
    ForceQuitPending,

    /// Runtime reported that its native resources are released.
    ShutdownReleased,

    /// The process relauncher was invoked with the pending request.
    ///
    /// Sets:
    /// - `args`: command-line params of the relaunch descriptor
    RelaunchIssued,

    /// The process relauncher's immediate-terminate primitive was invoked.
    ForceQuitIssued,

    // === Filtering events ===
    /// A runtime signal carried an identity that is not current.
    ///
    /// Sets:
    /// - `runtime`: stale identity
    /// - `reason`: signal name
    StaleSignalIgnored,

    /// A restart/force-quit request arrived while the session could not accept it.
    ///
    /// Sets:
    /// - `state`: session state at the time
    /// - `reason`: request name
    RequestIgnored,

    // === Shell passthrough ===
    /// A shell event was forwarded to the embedded view.
    ///
    /// Sets:
    /// - `reason`: event name
    /// - `code`: request code (activity/permission results)
    ShellEventForwarded,

    /// A shell event arrived with no embedded view attached.
    ///
    /// Sets:
    /// - `reason`: event name
    /// - `code`: request code (activity/permission results)
    ShellEventDropped,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Runtime identity involved, if applicable.
    pub runtime: Option<RuntimeIdentity>,
    /// Session state at the time, if applicable.
    pub state: Option<SessionState>,
    /// Human-readable reason (errors, signal names, overflow details).
    pub reason: Option<Arc<str>>,
    /// Request code of a forwarded shell event.
    pub code: Option<i32>,
    /// Argument list (command line or relaunch params).
    pub args: Option<Arc<[String]>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            runtime: None,
            state: None,
            reason: None,
            code: None,
            args: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a runtime identity.
    #[inline]
    pub fn with_runtime(mut self, id: RuntimeIdentity) -> Self {
        self.runtime = Some(id);
        self
    }

    /// Attaches the session state.
    #[inline]
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a request code.
    #[inline]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches an argument list.
    #[inline]
    pub fn with_args(mut self, args: impl Into<Arc<[String]>>) -> Self {
        self.args = Some(args.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::SessionStarted);
        let b = Event::new(EventKind::SessionStarted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builders_attach_metadata() {
        let id = RuntimeIdentity::next();
        let ev = Event::new(EventKind::StaleSignalIgnored)
            .with_runtime(id)
            .with_reason("restart")
            .with_state(SessionState::Running)
            .with_args(vec!["--debug".to_string()]);

        assert_eq!(ev.runtime, Some(id));
        assert_eq!(ev.state, Some(SessionState::Running));
        assert_eq!(ev.args.as_deref(), Some(&["--debug".to_string()][..]));
    }
}
