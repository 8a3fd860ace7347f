//! Process relaunchers shipped with the crate.
//!
//! - [`CommandRelauncher`]: re-executes a program and exits the current process;
//!   the replacement reads its [`RestartRequest`](crate::RestartRequest) back with
//!   [`inherited_request`].

mod command;

pub use command::{CommandRelauncher, RESTART_REQUEST_ENV, inherited_request};
