//! # HostSessionController: OS lifecycle → session components.
//!
//! The controller is the top-level state machine of one host session. It runs on the
//! control task only; every input reaches it either as a direct call from
//! [`Host`](crate::Host) or as a [`HostCommand`] drained from the handle channel.
//!
//! ## Wiring
//! ```text
//! start(descriptor)
//!   ├─► assemble(source, descriptor.params)       (once; failures → empty file part)
//!   ├─► shell.find_embedded_view()
//!   │      ├─ Some(view) → view.attach(handle), adopt view.runtime().identity()
//!   │      └─ None       → shell.create_embedded_view(handle), adopt its identity
//!   └─► state = Running
//!
//! Descriptor(d)        → store d; new launch requested → trigger_restart(d, flag cleared)
//! SpawnInstance(args)  → trigger_restart(descriptor{component, args}) → InstanceId sentinel
//! ForceQuit(id)        → identity check → coordinator.force_quit()
//! Restart(id)          → identity check → coordinator.trigger_restart(session descriptor)
//! ShutdownReleased     → coordinator.shutdown_released()
//! shell events         → forwarded to the current view (back falls back to the shell)
//! destroy()            → drop view, clear identity (never shuts the runtime down)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cmdline::{Assembly, CommandLineSource, assemble};
use crate::contract::{
    ActivityResult, EmbeddedRuntime, EmbeddedView, PermissionsResult, ProcessRelauncher, UiShell,
};
use crate::error::HostError;
use crate::events::{Bus, Event, EventKind};
use crate::session::{
    HostSession, InstanceId, RestartRequest, RuntimeIdentity, SessionState, StartupDescriptor,
};

use super::{HostCommand, HostConfig, HostHandle, RebirthCoordinator, SessionExit};

/// Top-level orchestration of one host session.
pub struct HostSessionController {
    cfg: HostConfig,
    session: HostSession,
    coordinator: RebirthCoordinator,
    shell: Arc<dyn UiShell>,
    source: Arc<dyn CommandLineSource>,
    view: Option<Arc<dyn EmbeddedView>>,
    tx: mpsc::UnboundedSender<HostCommand>,
    bus: Bus,
}

impl HostSessionController {
    pub(crate) fn new(
        cfg: HostConfig,
        shell: Arc<dyn UiShell>,
        relauncher: Arc<dyn ProcessRelauncher>,
        source: Arc<dyn CommandLineSource>,
        tx: mpsc::UnboundedSender<HostCommand>,
        bus: Bus,
    ) -> Self {
        Self {
            cfg,
            session: HostSession::new(),
            coordinator: RebirthCoordinator::new(relauncher, bus.clone(), tx.clone()),
            shell,
            source,
            view: None,
            tx,
            bus,
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &HostSession {
        &self.session
    }

    /// Starts the session: assembles the command line and attaches a runtime.
    ///
    /// Fails with [`HostError::AlreadyStarted`] on a second call.
    pub fn start(&mut self, descriptor: StartupDescriptor) -> Result<(), HostError> {
        if self.session.state() != SessionState::Init {
            return Err(HostError::AlreadyStarted);
        }
        tracing::debug!(
            component = %descriptor.component,
            params = ?descriptor.command_line_params,
            "starting host session"
        );

        let Assembly {
            command_line,
            file_error,
        } = assemble(self.source.as_ref(), descriptor.command_line_params.as_deref());
        if let Some(e) = file_error {
            if e.is_corrupt() {
                tracing::warn!(error = %e, "bundled command line is corrupt; ignoring it");
            } else {
                tracing::debug!(error = %e, "no bundled command line");
            }
            self.bus
                .publish(Event::new(EventKind::CommandLineFallback).with_reason(e.to_string()));
        }

        if !self.session.begin(command_line, descriptor.clone()) {
            return Err(HostError::AlreadyStarted);
        }
        self.session.state = SessionState::Running;

        match self.shell.find_embedded_view() {
            Some(view) => {
                tracing::trace!("reusing existing embedded view");
                view.attach(self.runtime_handle());
                self.adopt(view, EventKind::RuntimeReused);
            }
            None => {
                tracing::trace!("creating new embedded view");
                let view = self.shell.create_embedded_view(self.runtime_handle());
                self.adopt(view, EventKind::RuntimeCreated);
            }
        }

        self.bus.publish(
            Event::new(EventKind::SessionStarted).with_args(self.session.command_line().shared()),
        );
        Ok(())
    }

    /// Applies one command drained from the handle channel.
    pub(crate) fn dispatch(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::ForceQuit(id) => self.on_force_quit_requested(id),
            HostCommand::Restart(id) => self.on_restart_requested(id),
            HostCommand::Descriptor(d) => self.deliver_descriptor(d),
            HostCommand::SpawnInstance(args) => {
                self.spawn_new_instance(args);
            }
            HostCommand::ShutdownReleased => {
                self.coordinator.shutdown_released(&self.session);
            }
            HostCommand::ActivityResult(r) => self.on_activity_result(&r),
            HostCommand::PermissionsResult(r) => self.on_permissions_result(&r),
            HostCommand::BackPressed => self.on_back_pressed(),
        }
    }

    /// A new startup descriptor reached the already-running session.
    pub fn deliver_descriptor(&mut self, descriptor: StartupDescriptor) {
        self.session.set_descriptor(descriptor.clone());
        if descriptor.new_launch_requested {
            self.restart_for_new_launch(descriptor);
        }
    }

    /// Starts a brand-new runtime in a fresh process launched with `args`.
    pub fn spawn_new_instance(&mut self, args: Vec<String>) -> InstanceId {
        tracing::debug!(?args, "restarting with parameters");
        self.bus
            .publish(Event::new(EventKind::NewInstanceRequested).with_args(args.clone()));

        let descriptor = StartupDescriptor::new(self.cfg.component.clone()).with_params(args);
        self.trigger_restart(RestartRequest::new(descriptor));
        self.cfg.instance_id
    }

    /// Runtime `id` asked for immediate termination.
    pub fn on_force_quit_requested(&mut self, id: RuntimeIdentity) {
        if !self.check_identity(id, "force_quit") {
            return;
        }
        tracing::trace!(runtime = %id, "force quitting runtime instance");
        self.coordinator.force_quit(&mut self.session);
    }

    /// Runtime `id` asked for a whole-process restart.
    pub fn on_restart_requested(&mut self, id: RuntimeIdentity) {
        if !self.check_identity(id, "restart") {
            return;
        }
        tracing::trace!(runtime = %id, "restarting runtime instance");
        let descriptor = self.session.descriptor().clone().with_new_launch(false);
        self.trigger_restart(RestartRequest::new(descriptor));
    }

    /// Passive teardown by the OS: release references, never shut the runtime down.
    ///
    /// A restart already pending keeps its state so its relaunch can still complete.
    pub fn destroy(&mut self) {
        tracing::trace!(state = %self.session.state(), "destroying host session");
        self.view = None;
        self.session.identity.clear();
        if !self.session.state().is_pending() {
            self.session.state = SessionState::Terminated;
        }
        self.bus.publish(Event::new(EventKind::SessionDestroyed));
    }

    /// Forwards an activity result to the embedded view.
    pub fn on_activity_result(&mut self, result: &ActivityResult) {
        match &self.view {
            Some(view) => {
                view.on_activity_result(result);
                self.publish_shell("activity_result", Some(result.request_code), true);
            }
            None => self.publish_shell("activity_result", Some(result.request_code), false),
        }
    }

    /// Forwards a permission result to the embedded view.
    pub fn on_permissions_result(&mut self, result: &PermissionsResult) {
        match &self.view {
            Some(view) => {
                view.on_permissions_result(result);
                self.publish_shell("permissions_result", Some(result.request_code), true);
            }
            None => self.publish_shell("permissions_result", Some(result.request_code), false),
        }

        if self.cfg.logs_permission_code(result.request_code) {
            tracing::debug!(code = result.request_code, "received permissions request result");
            for (permission, granted) in result.permissions.iter().zip(&result.granted) {
                let verdict = if *granted { "granted" } else { "denied" };
                tracing::debug!("permission {permission} {verdict}");
            }
        }
    }

    /// Forwards back navigation, falling back to the shell without a view.
    pub fn on_back_pressed(&mut self) {
        match &self.view {
            Some(view) => {
                view.on_back_pressed();
                self.publish_shell("back_pressed", None, true);
            }
            None => {
                self.shell.default_back_pressed();
                self.publish_shell("back_pressed", None, false);
            }
        }
    }

    /// How the session ended, once it did.
    pub fn exit(&self) -> Option<SessionExit> {
        self.coordinator.issued().or_else(|| {
            (self.session.state() == SessionState::Terminated).then_some(SessionExit::Destroyed)
        })
    }

    fn trigger_restart(&mut self, request: RestartRequest) {
        let runtime: Option<Arc<dyn EmbeddedRuntime>> = self.view.as_ref().map(|v| v.runtime());
        self.coordinator
            .trigger_restart(&mut self.session, runtime.as_deref(), request);
    }

    fn restart_for_new_launch(&mut self, descriptor: StartupDescriptor) {
        tracing::debug!("new launch requested, restarting");
        self.bus.publish(Event::new(EventKind::NewLaunchRequested));
        self.trigger_restart(RestartRequest::new(descriptor.with_new_launch(false)));
    }

    fn adopt(&mut self, view: Arc<dyn EmbeddedView>, kind: EventKind) {
        let id = view.runtime().identity();
        self.session.identity.set_current(id);
        self.view = Some(view);
        self.bus.publish(Event::new(kind).with_runtime(id));
    }

    fn check_identity(&self, id: RuntimeIdentity, signal: &'static str) -> bool {
        if self.session.identity().is_current(id) {
            return true;
        }
        tracing::warn!(runtime = %id, signal, "signal from stale runtime instance; ignoring");
        self.bus.publish(
            Event::new(EventKind::StaleSignalIgnored)
                .with_runtime(id)
                .with_reason(signal),
        );
        false
    }

    fn runtime_handle(&self) -> HostHandle {
        HostHandle::new(
            self.tx.clone(),
            Some(self.session.command_line()),
            self.cfg.instance_id,
        )
    }

    fn publish_shell(&self, event: &'static str, code: Option<i32>, forwarded: bool) {
        let kind = if forwarded {
            EventKind::ShellEventForwarded
        } else {
            tracing::trace!(event, "no embedded view; dropping shell event");
            EventKind::ShellEventDropped
        };
        let mut ev = Event::new(kind).with_reason(event);
        if let Some(code) = code {
            ev = ev.with_code(code);
        }
        self.bus.publish(ev);
    }
}
