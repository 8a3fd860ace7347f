//! # Host: the control task of one process.
//!
//! [`Host`] owns the session controller, the command channel behind every
//! [`HostHandle`], the event [`Bus`] and the subscriber fan-out. All session state
//! is mutated from [`Host::run`] and nowhere else.
//!
//! ## Control loop
//! ```text
//! run(descriptor)
//!   ├─► subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   ├─► controller.start(descriptor)
//!   └─► drive():
//!         loop {
//!           controller.exit() is Some ─► return it
//!           select! {
//!             OS signal (optional)  ─► ShutdownRequested, controller.destroy() ─► Destroyed
//!             token.cancelled()     ─► ShutdownRequested, controller.destroy() ─► Destroyed
//!             rx.recv()             ─► controller.dispatch(cmd)
//!           }
//!         }
//!   └─► stop listener, drain subscriber queues
//! ```
//!
//! A real [`ProcessRelauncher`](crate::ProcessRelauncher) ends the process inside
//! `dispatch`, so `run` only returns `Relaunched`/`ForceQuit` with relaunchers that
//! return control (tests, embedders that exit on their own).
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostvisor::{CommandRelauncher, Host, HostConfig, StartupDescriptor, UiShell};
//!
//! # async fn demo(shell: Arc<dyn UiShell>) -> Result<(), hostvisor::HostError> {
//! let host = Host::builder(HostConfig::default())
//!     .with_shell(shell)
//!     .with_relauncher(Arc::new(CommandRelauncher::current()?))
//!     .build()?;
//!
//! let exit = host.run(StartupDescriptor::new("main")).await?;
//! println!("session ended: {exit:?}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::HostError;
use crate::events::{Bus, Event, EventKind};
use crate::session::StartupDescriptor;
use crate::subscribers::SubscriberSet;

use super::{HostBuilder, HostCommand, HostConfig, HostHandle, HostSessionController, shutdown};

/// How a host session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// A replacement process was launched after the runtime shut down.
    Relaunched,
    /// The process was asked to terminate immediately.
    ForceQuit,
    /// The session was torn down passively (OS signal, cancellation, destroy).
    Destroyed,
}

/// Control task of one host session.
pub struct Host {
    cfg: HostConfig,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    controller: HostSessionController,
    tx: mpsc::UnboundedSender<HostCommand>,
    rx: mpsc::UnboundedReceiver<HostCommand>,
    token: CancellationToken,
}

impl Host {
    /// Starts building a host with the given configuration.
    pub fn builder(cfg: HostConfig) -> HostBuilder {
        HostBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: HostConfig,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        controller: HostSessionController,
        tx: mpsc::UnboundedSender<HostCommand>,
        rx: mpsc::UnboundedReceiver<HostCommand>,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            controller,
            tx,
            rx,
            token: CancellationToken::new(),
        }
    }

    /// Handle for delivering lifecycle inputs from other threads.
    ///
    /// Carries no command line: it is taken before [`run`](Self::run) assembles one.
    /// Runtimes receive handles that do carry it.
    pub fn handle(&self) -> HostHandle {
        HostHandle::new(self.tx.clone(), None, self.cfg.instance_id)
    }

    /// Token that tears the session down when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Event bus of this host; receivers see events published after subscribing.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Starts the session and drives it until it ends.
    ///
    /// Fails only if the session cannot start.
    pub async fn run(mut self, descriptor: StartupDescriptor) -> Result<SessionExit, HostError> {
        let stop = CancellationToken::new();
        let listener = self.subscriber_listener(stop.clone());

        let exit = match self.controller.start(descriptor) {
            Ok(()) => Ok(self.drive().await),
            Err(e) => Err(e),
        };
        tracing::debug!(?exit, "host session finished");

        stop.cancel();
        let _ = listener.await;
        if let Ok(set) = Arc::try_unwrap(self.subs) {
            set.shutdown().await;
        }
        exit
    }

    async fn drive(&mut self) -> SessionExit {
        let token = self.token.clone();
        let signal = shutdown::termination(self.cfg.handle_os_signals);
        tokio::pin!(signal);

        loop {
            if let Some(exit) = self.controller.exit() {
                return exit;
            }
            tokio::select! {
                name = &mut signal => {
                    self.teardown(name);
                    return SessionExit::Destroyed;
                }
                _ = token.cancelled() => {
                    self.teardown("cancelled");
                    return SessionExit::Destroyed;
                }
                Some(cmd) = self.rx.recv() => {
                    tracing::trace!(?cmd, "host command");
                    self.controller.dispatch(cmd);
                }
            }
        }
    }

    /// Passive teardown; a pending restart is abandoned.
    fn teardown(&mut self, reason: &'static str) {
        tracing::info!(reason, "host shutdown requested");
        self.bus
            .publish(Event::new(EventKind::ShutdownRequested).with_reason(reason));
        self.controller.destroy();
    }

    /// Subscribes to the bus and forwards events to the subscriber set until `stop`.
    fn subscriber_listener(&self, stop: CancellationToken) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    res = rx.recv() => match res {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "event listener lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = stop.cancelled() => {
                        while let Ok(ev) = rx.try_recv() {
                            set.emit(&ev);
                        }
                        break;
                    }
                }
            }
        })
    }
}
