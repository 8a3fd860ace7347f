//! # Collaborator contracts.
//!
//! The host never implements rendering, the engine or process management itself;
//! the embedding application supplies them through these traits:
//!
//! - [`EmbeddedRuntime`] the engine instance (identity + graceful shutdown)
//! - [`EmbeddedView`], [`UiShell`] presentation and OS-callback plumbing
//! - [`ProcessRelauncher`] whole-process relaunch / immediate termination
//! - [`ShutdownSignal`] single-use completion handle for runtime shutdown

mod relauncher;
mod runtime;
mod shell;

pub use relauncher::ProcessRelauncher;
pub use runtime::{EmbeddedRuntime, ShutdownSignal};
pub use shell::{ActivityResult, EmbeddedView, PermissionsResult, UiShell};
