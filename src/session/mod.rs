//! # Session data model.
//!
//! - [`HostSession`] per-process session record owned by the controller
//! - [`SessionState`] lifecycle states of a session
//! - [`RuntimeIdentity`], [`IdentityTracker`] opaque runtime tokens and the "current" slot
//! - [`StartupDescriptor`], [`RestartRequest`], [`InstanceId`] launch-boundary types

mod descriptor;
mod host_session;
mod identity;
mod state;

pub use descriptor::{InstanceId, RestartRequest, StartupDescriptor};
pub use host_session::HostSession;
pub use identity::{IdentityTracker, RuntimeIdentity};
pub use state::SessionState;
