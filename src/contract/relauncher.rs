//! # Process relauncher contract.
//!
//! Both operations are expected to end the current process. The host treats them
//! as one-shot: it never calls either twice in one session and never retries.

use crate::session::RestartRequest;

/// OS-level primitive that replaces or ends the current process.
pub trait ProcessRelauncher: Send + Sync + 'static {
    /// Terminates the current process and starts a fresh one from `request`.
    fn relaunch(&self, request: RestartRequest);

    /// Terminates the current process immediately.
    fn force_quit(&self);
}
