//! In-crate test doubles for the collaborator contracts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::contract::{
    ActivityResult, EmbeddedRuntime, EmbeddedView, PermissionsResult, ProcessRelauncher,
    ShutdownSignal, UiShell,
};
use crate::core::HostHandle;
use crate::session::{RestartRequest, RuntimeIdentity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Relaunch {
    Restart(RestartRequest),
    ForceQuit,
}

#[derive(Default)]
pub(crate) struct FakeRelauncher {
    calls: Mutex<Vec<Relaunch>>,
}

impl FakeRelauncher {
    pub(crate) fn calls(&self) -> Vec<Relaunch> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRelauncher for FakeRelauncher {
    fn relaunch(&self, request: RestartRequest) {
        self.calls.lock().unwrap().push(Relaunch::Restart(request));
    }

    fn force_quit(&self) {
        self.calls.lock().unwrap().push(Relaunch::ForceQuit);
    }
}

pub(crate) struct FakeRuntime {
    id: RuntimeIdentity,
    immediate: bool,
    shutdowns: AtomicUsize,
    held: Mutex<Option<ShutdownSignal>>,
}

impl FakeRuntime {
    /// Completes shutdown inside `shutdown_and_release`.
    pub(crate) fn immediate() -> Arc<Self> {
        Arc::new(Self::build(true))
    }

    /// Holds the signal until [`complete_shutdown`](Self::complete_shutdown).
    pub(crate) fn deferred() -> Arc<Self> {
        Arc::new(Self::build(false))
    }

    fn build(immediate: bool) -> Self {
        Self {
            id: RuntimeIdentity::next(),
            immediate,
            shutdowns: AtomicUsize::new(0),
            held: Mutex::new(None),
        }
    }

    pub(crate) fn as_dyn(&self) -> &dyn EmbeddedRuntime {
        self
    }

    pub(crate) fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub(crate) fn complete_shutdown(&self) {
        if let Some(signal) = self.held.lock().unwrap().take() {
            signal.complete();
        }
    }
}

impl EmbeddedRuntime for FakeRuntime {
    fn identity(&self) -> RuntimeIdentity {
        self.id
    }

    fn shutdown_and_release(&self, done: ShutdownSignal) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        if self.immediate {
            done.complete();
        } else {
            *self.held.lock().unwrap() = Some(done);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Forwarded {
    Activity(ActivityResult),
    Permissions(PermissionsResult),
    Back,
}

pub(crate) struct FakeView {
    pub(crate) runtime: Arc<FakeRuntime>,
    forwarded: Mutex<Vec<Forwarded>>,
    attached: Mutex<Vec<HostHandle>>,
}

impl FakeView {
    pub(crate) fn new(runtime: Arc<FakeRuntime>) -> Arc<Self> {
        Arc::new(Self {
            runtime,
            forwarded: Mutex::new(Vec::new()),
            attached: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn forwarded(&self) -> Vec<Forwarded> {
        self.forwarded.lock().unwrap().clone()
    }

    /// Handles passed through [`EmbeddedView::attach`], oldest first.
    pub(crate) fn attached(&self) -> Vec<HostHandle> {
        self.attached.lock().unwrap().clone()
    }
}

impl EmbeddedView for FakeView {
    fn runtime(&self) -> Arc<dyn EmbeddedRuntime> {
        self.runtime.clone()
    }

    fn on_activity_result(&self, result: &ActivityResult) {
        self.forwarded
            .lock()
            .unwrap()
            .push(Forwarded::Activity(result.clone()));
    }

    fn on_permissions_result(&self, result: &PermissionsResult) {
        self.forwarded
            .lock()
            .unwrap()
            .push(Forwarded::Permissions(result.clone()));
    }

    fn on_back_pressed(&self) {
        self.forwarded.lock().unwrap().push(Forwarded::Back);
    }

    fn attach(&self, host: HostHandle) {
        self.attached.lock().unwrap().push(host);
    }
}

#[derive(Default)]
pub(crate) struct FakeShell {
    existing: Mutex<Option<Arc<FakeView>>>,
    created: Mutex<Vec<Arc<FakeView>>>,
    handles: Mutex<Vec<HostHandle>>,
    default_backs: AtomicUsize,
    deferred_runtimes: bool,
}

impl FakeShell {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Views created by this shell hold their shutdown signal until told to complete.
    pub(crate) fn deferred() -> Arc<Self> {
        Arc::new(Self {
            deferred_runtimes: true,
            ..Self::default()
        })
    }

    /// Shell that already holds a view from an earlier attachment.
    pub(crate) fn with_existing(view: Arc<FakeView>) -> Arc<Self> {
        let shell = Self::default();
        *shell.existing.lock().unwrap() = Some(view);
        Arc::new(shell)
    }

    pub(crate) fn created(&self) -> Vec<Arc<FakeView>> {
        self.created.lock().unwrap().clone()
    }

    pub(crate) fn handles(&self) -> Vec<HostHandle> {
        self.handles.lock().unwrap().clone()
    }

    pub(crate) fn default_backs(&self) -> usize {
        self.default_backs.load(Ordering::SeqCst)
    }
}

impl UiShell for FakeShell {
    fn find_embedded_view(&self) -> Option<Arc<dyn EmbeddedView>> {
        self.existing
            .lock()
            .unwrap()
            .clone()
            .map(|v| v as Arc<dyn EmbeddedView>)
    }

    fn create_embedded_view(&self, host: HostHandle) -> Arc<dyn EmbeddedView> {
        let runtime = if self.deferred_runtimes {
            FakeRuntime::deferred()
        } else {
            FakeRuntime::immediate()
        };
        let view = FakeView::new(runtime);
        self.created.lock().unwrap().push(view.clone());
        self.handles.lock().unwrap().push(host);
        view
    }

    fn default_back_pressed(&self) {
        self.default_backs.fetch_add(1, Ordering::SeqCst);
    }
}
