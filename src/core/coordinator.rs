//! # RebirthCoordinator: ordered shutdown-then-relaunch.
//!
//! The embedded runtime cannot be re-initialized in place, so restarting means
//! replacing the whole process. The coordinator drives that sequence and the
//! immediate-termination path.
//!
//! ## State machine
//! ```text
//! Running ──trigger_restart()──► RestartPending
//!    │                              ├─► runtime.shutdown_and_release(signal)
//!    │                              │        ...
//!    │                              └─► ShutdownReleased (control task) ──► relauncher.relaunch(request)
//!    │
//!    └──force_quit()──────────────► ForceQuitPending ──► relauncher.force_quit()
//! ```
//!
//! ## Rules
//! - Only `Running` accepts a request; anything else is published as `RequestIgnored`
//! - Pending states are terminal for the session: first request wins
//! - Shutdown completion **strictly precedes** the relaunch call
//! - Force quit never asks the runtime to shut down
//! - No runtime attached → nothing to release, relaunch is issued directly

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::contract::{EmbeddedRuntime, ProcessRelauncher, ShutdownSignal};
use crate::events::{Bus, Event, EventKind};
use crate::session::{HostSession, RestartRequest, SessionState};

use super::{HostCommand, SessionExit};

/// Executes restart and force-quit transitions for one session.
pub struct RebirthCoordinator {
    relauncher: Arc<dyn ProcessRelauncher>,
    bus: Bus,
    tx: mpsc::UnboundedSender<HostCommand>,
    pending: Option<RestartRequest>,
    issued: Option<SessionExit>,
}

impl RebirthCoordinator {
    pub(crate) fn new(
        relauncher: Arc<dyn ProcessRelauncher>,
        bus: Bus,
        tx: mpsc::UnboundedSender<HostCommand>,
    ) -> Self {
        Self {
            relauncher,
            bus,
            tx,
            pending: None,
            issued: None,
        }
    }

    /// Starts the restart sequence.
    ///
    /// Returns `false` if the session could not accept the request.
    pub fn trigger_restart(
        &mut self,
        session: &mut HostSession,
        runtime: Option<&dyn EmbeddedRuntime>,
        request: RestartRequest,
    ) -> bool {
        if !self.admit(session.state, "restart") {
            return false;
        }
        session.state = SessionState::RestartPending;

        let mut ev = Event::new(EventKind::RestartPending)
            .with_args(request.descriptor.params().to_vec());
        if let Some(rt) = runtime {
            ev = ev.with_runtime(rt.identity());
        }
        self.bus.publish(ev);

        match runtime {
            Some(rt) => {
                tracing::debug!(runtime = %rt.identity(), "shutting down runtime before relaunch");
                self.pending = Some(request);
                rt.shutdown_and_release(ShutdownSignal::new(self.tx.clone()));
            }
            None => {
                tracing::debug!("no runtime attached; relaunching directly");
                self.relaunch(request);
            }
        }
        true
    }

    /// Terminates the process without a graceful runtime shutdown.
    ///
    /// Returns `false` if the session could not accept the request.
    pub fn force_quit(&mut self, session: &mut HostSession) -> bool {
        if !self.admit(session.state, "force_quit") {
            return false;
        }
        session.state = SessionState::ForceQuitPending;
        self.bus.publish(Event::new(EventKind::ForceQuitPending));

        tracing::debug!("force quitting");
        self.bus.publish(Event::new(EventKind::ForceQuitIssued));
        self.issued = Some(SessionExit::ForceQuit);
        self.relauncher.force_quit();
        true
    }

    /// Continuation of [`trigger_restart`](Self::trigger_restart): the runtime released
    /// its resources, so the relaunch can be issued.
    ///
    /// Returns `false` if no restart was waiting for this completion.
    pub fn shutdown_released(&mut self, session: &HostSession) -> bool {
        if session.state != SessionState::RestartPending {
            tracing::warn!(state = %session.state, "unexpected shutdown completion; ignoring");
            return false;
        }
        let Some(request) = self.pending.take() else {
            tracing::warn!("shutdown completion without a pending restart; ignoring");
            return false;
        };
        self.bus.publish(Event::new(EventKind::ShutdownReleased));
        self.relaunch(request);
        true
    }

    /// How the session ended, once a relaunch or force quit was issued.
    pub fn issued(&self) -> Option<SessionExit> {
        self.issued
    }

    fn relaunch(&mut self, request: RestartRequest) {
        tracing::debug!(params = ?request.descriptor.params(), "relaunching process");
        self.bus.publish(
            Event::new(EventKind::RelaunchIssued).with_args(request.descriptor.params().to_vec()),
        );
        self.issued = Some(SessionExit::Relaunched);
        self.relauncher.relaunch(request);
    }

    fn admit(&self, state: SessionState, request: &'static str) -> bool {
        if state == SessionState::Running {
            return true;
        }
        tracing::warn!(%state, request, "session cannot accept request; ignoring");
        self.bus.publish(
            Event::new(EventKind::RequestIgnored)
                .with_state(state)
                .with_reason(request),
        );
        false
    }
}
