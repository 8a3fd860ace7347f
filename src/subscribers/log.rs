//! # LogWriter: events rendered through `tracing`.
//!
//! A subscriber that turns every [`Event`] into one structured `tracing` record.
//! Rebirth transitions log at `info`, filtered inputs at `warn`, subscriber
//! failures at `error`, everything else at `debug`.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO  hostvisor: session started args=["--verbose"]
//! DEBUG hostvisor: runtime created runtime=runtime#1
//! INFO  hostvisor: restart pending runtime=runtime#1 args=[]
//! INFO  hostvisor: relaunch issued args=[]
//! WARN  hostvisor: stale signal ignored runtime=runtime#0 reason=restart
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let runtime = e.runtime.map(tracing::field::display);
        let state = e.state.map(tracing::field::display);
        let reason = e.reason.as_deref();
        let args = e.args.as_deref().map(tracing::field::debug);

        match e.kind {
            EventKind::SubscriberPanicked => {
                tracing::error!(seq = e.seq, reason, "subscriber panicked");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(seq = e.seq, reason, "subscriber overflow");
            }
            EventKind::ShutdownRequested => {
                tracing::info!(seq = e.seq, reason, "shutdown requested");
            }
            EventKind::SessionStarted => {
                tracing::info!(seq = e.seq, args, "session started");
            }
            EventKind::CommandLineFallback => {
                tracing::warn!(seq = e.seq, reason, "bundled command line ignored");
            }
            EventKind::RuntimeCreated => {
                tracing::debug!(seq = e.seq, runtime, "runtime created");
            }
            EventKind::RuntimeReused => {
                tracing::debug!(seq = e.seq, runtime, "runtime reused");
            }
            EventKind::SessionDestroyed => {
                tracing::info!(seq = e.seq, "session destroyed");
            }
            EventKind::NewLaunchRequested => {
                tracing::info!(seq = e.seq, "new launch requested");
            }
            EventKind::NewInstanceRequested => {
                tracing::info!(seq = e.seq, args, "new instance requested");
            }
            EventKind::RestartPending => {
                tracing::info!(seq = e.seq, runtime, args, "restart pending");
            }
            EventKind::ForceQuitPending => {
                tracing::info!(seq = e.seq, "force quit pending");
            }
            EventKind::ShutdownReleased => {
                tracing::debug!(seq = e.seq, "runtime shutdown released");
            }
            EventKind::RelaunchIssued => {
                tracing::info!(seq = e.seq, args, "relaunch issued");
            }
            EventKind::ForceQuitIssued => {
                tracing::info!(seq = e.seq, "force quit issued");
            }
            EventKind::StaleSignalIgnored => {
                tracing::warn!(seq = e.seq, runtime, reason, "stale signal ignored");
            }
            EventKind::RequestIgnored => {
                tracing::warn!(seq = e.seq, state, reason, "request ignored");
            }
            EventKind::ShellEventForwarded => {
                tracing::trace!(seq = e.seq, reason, code = e.code, "shell event forwarded");
            }
            EventKind::ShellEventDropped => {
                tracing::debug!(seq = e.seq, reason, code = e.code, "shell event dropped");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
