//! # hostvisor
//!
//! **Hostvisor** manages the lifecycle of a host process that embeds a runtime
//! which cannot be re-initialized in place.
//!
//! It builds the session command line once, attaches or reuses the embedded
//! runtime, filters runtime signals by identity, and implements "restart" as an
//! ordered sequence: graceful runtime shutdown first, whole-process relaunch after.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   runtime threads            shell / OS callbacks            OS signals, CancellationToken
//!        │ request_restart(id)       │ descriptor, results, back        │
//!        │ request_force_quit(id)    │                                  │
//!        │ ShutdownSignal::complete  │                                  │
//!        ▼                           ▼                                  ▼
//! ┌───────────────────────────────────────────────────────────────────────────────┐
//! │  Host (control task)                                                          │
//! │  - HostHandle ──► mpsc (unbounded) ──► drive() loop                          │
//! │  - HostSessionController (session state machine)                             │
//! │      ├─ cmdline::assemble        (bundled file ++ launch params, once)        │
//! │      ├─ IdentityTracker          (only the current runtime may signal)        │
//! │      └─ RebirthCoordinator       (shutdown ─► relaunch, or force quit)        │
//! └──────┬─────────────────────────────────┬──────────────────────────────┬───────┘
//!        ▼                                 ▼                              ▼
//!   UiShell / EmbeddedView         ProcessRelauncher               Bus (broadcast)
//!   (find/create view, passthrough)  (relaunch / force quit)              │
//!                                                                         ▼
//!                                                              SubscriberSet ─► LogWriter, ...
//! ```
//!
//! ### Lifecycle
//! ```text
//! Init ──start()──► Running ──restart (current id)──► RestartPending ──ShutdownReleased──► relaunch
//!                      │
//!                      ├──force quit (current id)──► ForceQuitPending ──► force_quit
//!                      │
//!                      └──destroy() / signal / cancel──► Terminated
//!
//! Signals from a stale runtime identity, and requests outside Running, are ignored
//! and published as events.
//! ```
//!
//! ## Features
//! | Area               | Description                                                   | Key types / traits                               |
//! |--------------------|---------------------------------------------------------------|--------------------------------------------------|
//! | **Host**           | Control task, builder, cross-thread handle.                   | [`Host`], [`HostBuilder`], [`HostHandle`]        |
//! | **Session**        | Session state, runtime identity, restart requests.            | [`HostSession`], [`IdentityTracker`], [`RestartRequest`] |
//! | **Contracts**      | Seams implemented by the embedding application.               | [`EmbeddedRuntime`], [`UiShell`], [`ProcessRelauncher`] |
//! | **Command line**   | Bundled file codec and assembly.                              | [`cmdline::assemble`], [`cmdline::FileSource`]   |
//! | **Relaunch**       | Default relauncher re-executing the current program.          | [`CommandRelauncher`], [`inherited_request`]     |
//! | **Subscriber API** | Hook into lifecycle events.                                   | [`Subscribe`], [`Event`], [`EventKind`]          |
//! | **Errors**         | Typed errors.                                                 | [`HostError`], [`CommandLineError`]              |
//!
//! ## Optional features
//! - `logging` _(default)_: exports [`LogWriter`], a subscriber rendering events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use hostvisor::{
//!     ActivityResult, EmbeddedRuntime, EmbeddedView, Host, HostConfig, HostHandle,
//!     PermissionsResult, ProcessRelauncher, RestartRequest, RuntimeIdentity, SessionExit,
//!     ShutdownSignal, StartupDescriptor, UiShell,
//! };
//!
//! struct Engine(RuntimeIdentity);
//! impl EmbeddedRuntime for Engine {
//!     fn identity(&self) -> RuntimeIdentity { self.0 }
//!     fn shutdown_and_release(&self, done: ShutdownSignal) { done.complete(); }
//! }
//!
//! struct View(Arc<Engine>);
//! impl EmbeddedView for View {
//!     fn runtime(&self) -> Arc<dyn EmbeddedRuntime> { self.0.clone() }
//!     fn on_activity_result(&self, _: &ActivityResult) {}
//!     fn on_permissions_result(&self, _: &PermissionsResult) {}
//!     fn on_back_pressed(&self) {}
//!     fn attach(&self, _: HostHandle) {}
//! }
//!
//! struct Shell;
//! impl UiShell for Shell {
//!     fn find_embedded_view(&self) -> Option<Arc<dyn EmbeddedView>> { None }
//!     fn create_embedded_view(&self, host: HostHandle) -> Arc<dyn EmbeddedView> {
//!         let engine = Arc::new(Engine(RuntimeIdentity::next()));
//!         // The engine decides to restart right away.
//!         host.request_restart(engine.0).unwrap();
//!         Arc::new(View(engine))
//!     }
//!     fn default_back_pressed(&self) {}
//! }
//!
//! #[derive(Default)]
//! struct Recorder(Mutex<Vec<RestartRequest>>);
//! impl ProcessRelauncher for Recorder {
//!     fn relaunch(&self, request: RestartRequest) { self.0.lock().unwrap().push(request); }
//!     fn force_quit(&self) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), hostvisor::HostError> {
//!     let relauncher = Arc::new(Recorder::default());
//!     let cfg = HostConfig { handle_os_signals: false, ..HostConfig::default() };
//!
//!     let host = Host::builder(cfg)
//!         .with_shell(Arc::new(Shell))
//!         .with_relauncher(relauncher.clone())
//!         .build()?;
//!
//!     let exit = host.run(StartupDescriptor::new("main").with_params(["--scene", "intro"])).await?;
//!
//!     assert_eq!(exit, SessionExit::Relaunched);
//!     assert_eq!(relauncher.0.lock().unwrap()[0].descriptor.params(), ["--scene", "intro"]);
//!     Ok(())
//! }
//! ```

pub mod cmdline;
mod contract;
mod core;
mod error;
mod events;
mod relaunch;
mod session;
mod subscribers;

// ---- Public re-exports ----

pub use contract::{
    ActivityResult, EmbeddedRuntime, EmbeddedView, PermissionsResult, ProcessRelauncher,
    ShutdownSignal, UiShell,
};
pub use core::{
    Host, HostBuilder, HostConfig, HostHandle, REQUEST_ALL_PERMISSIONS, REQUEST_SINGLE_PERMISSION,
    SessionExit,
};
pub use error::{CommandLineError, HostError};
pub use events::{Bus, Event, EventKind};
pub use relaunch::{CommandRelauncher, RESTART_REQUEST_ENV, inherited_request};
pub use session::{
    HostSession, IdentityTracker, InstanceId, RestartRequest, RuntimeIdentity, SessionState,
    StartupDescriptor,
};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: built-in subscriber rendering events through `tracing`.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
