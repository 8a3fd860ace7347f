//! Host core: the control task and everything that runs on it.
//!
//! Internal modules:
//! - [`host`]: owns the control loop, the event bus and the subscriber fan-out;
//! - [`builder`]: wires collaborators into a [`Host`];
//! - [`controller`]: session state machine driven by lifecycle inputs;
//! - [`coordinator`]: ordered shutdown-then-relaunch and force quit;
//! - [`handle`]: cross-thread entry point marshalling onto the control task;
//! - [`config`]: host-wide settings;
//! - [`shutdown`]: OS termination signals.

mod builder;
mod config;
mod controller;
mod coordinator;
#[cfg(test)]
pub(crate) mod fakes;
mod handle;
mod host;
mod shutdown;

pub use builder::HostBuilder;
pub use config::{HostConfig, REQUEST_ALL_PERMISSIONS, REQUEST_SINGLE_PERMISSION};
pub(crate) use controller::HostSessionController;
pub(crate) use coordinator::RebirthCoordinator;
pub(crate) use handle::HostCommand;
pub use handle::HostHandle;
pub use host::{Host, SessionExit};
