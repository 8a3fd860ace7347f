//! # Host handle: the only way into the control task.
//!
//! Runtimes and shells live on their own threads. They never touch session state;
//! they enqueue a [`HostCommand`] and the control task applies it in order.
//!
//! ```text
//! runtime thread ──request_restart(id)──┐
//! shell thread ───activity_result(..)───┼──► mpsc (unbounded) ──► Host::drive() ──► controller
//! runtime thread ──ShutdownSignal──────┘
//! ```

use tokio::sync::mpsc;

use crate::cmdline::CommandLine;
use crate::contract::{ActivityResult, PermissionsResult};
use crate::error::HostError;
use crate::session::{InstanceId, RuntimeIdentity, StartupDescriptor};

/// Command applied by the control task.
#[derive(Debug)]
pub(crate) enum HostCommand {
    ForceQuit(RuntimeIdentity),
    Restart(RuntimeIdentity),
    Descriptor(StartupDescriptor),
    SpawnInstance(Vec<String>),
    ShutdownReleased,
    ActivityResult(ActivityResult),
    PermissionsResult(PermissionsResult),
    BackPressed,
}

/// Cloneable, thread-safe handle to a running host.
///
/// Every method only enqueues; the effect happens later on the control task.
/// Methods fail with [`HostError::Closed`] once the control task is gone.
#[derive(Clone, Debug)]
pub struct HostHandle {
    tx: mpsc::UnboundedSender<HostCommand>,
    command_line: Option<CommandLine>,
    instance_id: InstanceId,
}

impl HostHandle {
    pub(crate) fn new(
        tx: mpsc::UnboundedSender<HostCommand>,
        command_line: Option<CommandLine>,
        instance_id: InstanceId,
    ) -> Self {
        Self {
            tx,
            command_line,
            instance_id,
        }
    }

    /// Session command line.
    ///
    /// `Some` for runtime handles (given to the shell when a view is created or
    /// re-attached); `None` for [`Host::handle`](crate::Host::handle), which is
    /// taken before the command line exists.
    pub fn command_line(&self) -> Option<&[String]> {
        self.command_line.as_deref()
    }

    /// Runtime `id` asks for immediate process termination.
    pub fn request_force_quit(&self, id: RuntimeIdentity) -> Result<(), HostError> {
        self.send(HostCommand::ForceQuit(id))
    }

    /// Runtime `id` asks for a whole-process restart.
    pub fn request_restart(&self, id: RuntimeIdentity) -> Result<(), HostError> {
        self.send(HostCommand::Restart(id))
    }

    /// Delivers a new startup descriptor to the running session.
    pub fn deliver_descriptor(&self, descriptor: StartupDescriptor) -> Result<(), HostError> {
        self.send(HostCommand::Descriptor(descriptor))
    }

    /// Requests a brand-new runtime in a fresh process started with `args`.
    ///
    /// Returns the configured sentinel; the new process is not observable from here.
    pub fn spawn_new_instance(&self, args: Vec<String>) -> Result<InstanceId, HostError> {
        self.send(HostCommand::SpawnInstance(args))?;
        Ok(self.instance_id)
    }

    /// Forwards an activity result to the embedded view.
    pub fn activity_result(&self, result: ActivityResult) -> Result<(), HostError> {
        self.send(HostCommand::ActivityResult(result))
    }

    /// Forwards a permission result to the embedded view.
    pub fn permissions_result(&self, result: PermissionsResult) -> Result<(), HostError> {
        self.send(HostCommand::PermissionsResult(result))
    }

    /// Forwards back navigation.
    pub fn back_pressed(&self) -> Result<(), HostError> {
        self.send(HostCommand::BackPressed)
    }

    fn send(&self, cmd: HostCommand) -> Result<(), HostError> {
        self.tx.send(cmd).map_err(|_| HostError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_returns_sentinel_and_enqueues() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = HostHandle::new(tx, None, InstanceId(7));

        let id = handle
            .spawn_new_instance(vec!["--debug".into()])
            .expect("enqueue");

        assert_eq!(id, InstanceId(7));
        assert!(matches!(
            rx.try_recv(),
            Ok(HostCommand::SpawnInstance(args)) if args == ["--debug"]
        ));
    }

    #[test]
    fn closed_channel_is_reported() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = HostHandle::new(
            tx,
            Some(CommandLine::from(vec!["--x".to_string()])),
            InstanceId::SENTINEL,
        );
        assert_eq!(handle.command_line(), Some(&["--x".to_string()][..]));

        let err = handle.back_pressed().unwrap_err();
        assert!(matches!(err, HostError::Closed));
    }
}
