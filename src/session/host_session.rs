//! # Per-process session record.
//!
//! [`HostSession`] is owned exclusively by the controller. The command line is
//! written once by [`HostSession::begin`] and is read-only afterwards.

use crate::cmdline::CommandLine;

use super::{IdentityTracker, SessionState, StartupDescriptor};

/// One host session: from controller creation to process termination or relaunch.
#[derive(Debug, Default)]
pub struct HostSession {
    command_line: Option<CommandLine>,
    descriptor: StartupDescriptor,
    pub(crate) identity: IdentityTracker,
    pub(crate) state: SessionState,
}

impl HostSession {
    /// Creates a session in [`SessionState::Init`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the command line and records the startup descriptor.
    ///
    /// Returns `false` (and changes nothing) if the command line was already set.
    pub(crate) fn begin(
        &mut self,
        command_line: CommandLine,
        descriptor: StartupDescriptor,
    ) -> bool {
        if self.command_line.is_some() {
            return false;
        }
        self.command_line = Some(command_line);
        self.descriptor = descriptor;
        true
    }

    /// Assembled command line; empty before the session starts.
    pub fn command_line(&self) -> CommandLine {
        self.command_line.clone().unwrap_or_default()
    }

    /// Descriptor most recently delivered to this session.
    pub fn descriptor(&self) -> &StartupDescriptor {
        &self.descriptor
    }

    pub(crate) fn set_descriptor(&mut self, descriptor: StartupDescriptor) {
        self.descriptor = descriptor;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current runtime identity tracker.
    pub fn identity(&self) -> &IdentityTracker {
        &self.identity
    }
}
