//! # Embedded runtime contract.
//!
//! A runtime owns native resources that cannot be re-initialized in place. The only
//! lifecycle operation the host asks of it is [`EmbeddedRuntime::shutdown_and_release`],
//! answered through a [`ShutdownSignal`].
//!
//! ## Completion rules
//! - [`ShutdownSignal::complete`] consumes the signal: at most one completion per request
//! - Completion may happen on any thread; it is marshaled onto the control task
//! - Dropping the signal without completing it means shutdown never finished:
//!   the session stays in `RestartPending` and no relaunch happens

use tokio::sync::mpsc;

use crate::core::HostCommand;
use crate::session::RuntimeIdentity;

/// Engine instance hosted by an [`EmbeddedView`](crate::EmbeddedView).
pub trait EmbeddedRuntime: Send + Sync + 'static {
    /// Identity issued when this instance was created.
    fn identity(&self) -> RuntimeIdentity;

    /// Shuts the runtime down and releases its process-wide resources.
    ///
    /// Implementations call `done.complete()` once nothing of the old instance can
    /// race a new process. Blocking work belongs on the runtime's own threads.
    fn shutdown_and_release(&self, done: ShutdownSignal);
}

/// Single-use completion handle passed to [`EmbeddedRuntime::shutdown_and_release`].
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: Option<mpsc::UnboundedSender<HostCommand>>,
}

impl ShutdownSignal {
    pub(crate) fn new(tx: mpsc::UnboundedSender<HostCommand>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Reports that the runtime released its resources.
    pub fn complete(mut self) {
        if let Some(tx) = self.tx.take() {
            if tx.send(HostCommand::ShutdownReleased).is_err() {
                tracing::warn!("shutdown completed after the host control task exited");
            }
        }
    }
}

impl Drop for ShutdownSignal {
    fn drop(&mut self) {
        if self.tx.is_some() {
            tracing::warn!("shutdown signal dropped without completion; relaunch will not happen");
        }
    }
}
