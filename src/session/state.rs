//! # Session lifecycle states.
//!
//! ```text
//!   Init ──start()──► Running ──trigger_restart()──► RestartPending ──► relaunch
//!                        ├───────force_quit()──────► ForceQuitPending ──► process exit
//!                        └───────destroy()─────────► Terminated
//! ```
//!
//! `Terminated` is only observed in-process after a passive teardown; after a
//! relaunch or force quit the process is gone.

use std::fmt;

/// Lifecycle state of a [`HostSession`](crate::HostSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Created; command line not yet assembled.
    #[default]
    Init,
    /// Runtime attached and accepting requests.
    Running,
    /// Waiting for the runtime to release its resources before relaunch.
    RestartPending,
    /// Immediate termination requested.
    ForceQuitPending,
    /// Torn down.
    Terminated,
}

impl SessionState {
    /// True for the two states that run to process termination.
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, SessionState::RestartPending | SessionState::ForceQuitPending)
    }

    /// Short stable label for logs.
    pub fn as_label(self) -> &'static str {
        match self {
            SessionState::Init => "init",
            SessionState::Running => "running",
            SessionState::RestartPending => "restart_pending",
            SessionState::ForceQuitPending => "force_quit_pending",
            SessionState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
