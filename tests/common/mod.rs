#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hostvisor::{
    ActivityResult, EmbeddedRuntime, EmbeddedView, Event, EventKind, HostConfig, HostHandle,
    PermissionsResult, ProcessRelauncher, RestartRequest, RuntimeIdentity, ShutdownSignal,
    Subscribe, UiShell,
};

/// How an engine reacts to `shutdown_and_release`.
#[derive(Clone, Copy, Debug)]
pub enum Shutdown {
    /// Completes on the calling thread.
    Inline,
    /// Completes later from a separate OS thread.
    Threaded(Duration),
    /// Keeps the signal until the test completes it.
    Held,
    /// Drops the signal without completing it.
    Dropped,
}

pub struct Engine {
    id: RuntimeIdentity,
    mode: Shutdown,
    shutdowns: AtomicUsize,
    held: Mutex<Option<ShutdownSignal>>,
}

impl Engine {
    pub fn new(mode: Shutdown) -> Arc<Self> {
        Arc::new(Self {
            id: RuntimeIdentity::next(),
            mode,
            shutdowns: AtomicUsize::new(0),
            held: Mutex::new(None),
        })
    }

    pub fn id(&self) -> RuntimeIdentity {
        self.id
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn complete_held(&self) {
        if let Some(done) = self.held.lock().unwrap().take() {
            done.complete();
        }
    }
}

impl EmbeddedRuntime for Engine {
    fn identity(&self) -> RuntimeIdentity {
        self.id
    }

    fn shutdown_and_release(&self, done: ShutdownSignal) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Shutdown::Inline => done.complete(),
            Shutdown::Threaded(delay) => {
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    done.complete();
                });
            }
            Shutdown::Held => *self.held.lock().unwrap() = Some(done),
            Shutdown::Dropped => drop(done),
        }
    }
}

pub struct View {
    pub engine: Arc<Engine>,
    pub backs: AtomicUsize,
    host: Mutex<Option<HostHandle>>,
}

impl View {
    /// Handle of the session the view was last attached to.
    pub fn host(&self) -> Option<HostHandle> {
        self.host.lock().unwrap().clone()
    }
}

impl EmbeddedView for View {
    fn runtime(&self) -> Arc<dyn EmbeddedRuntime> {
        self.engine.clone()
    }

    fn on_activity_result(&self, _result: &ActivityResult) {}

    fn on_permissions_result(&self, _result: &PermissionsResult) {}

    fn on_back_pressed(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }

    fn attach(&self, host: HostHandle) {
        *self.host.lock().unwrap() = Some(host);
    }
}

/// Shell that creates one engine per view and remembers the handle it got.
pub struct Shell {
    mode: Shutdown,
    existing: Option<Arc<View>>,
    created: Mutex<Vec<(HostHandle, Arc<View>)>>,
}

impl Shell {
    pub fn new(mode: Shutdown) -> Arc<Self> {
        Arc::new(Self {
            mode,
            existing: None,
            created: Mutex::new(Vec::new()),
        })
    }

    /// Shell still holding `view` from a previous session.
    pub fn reusing(view: Arc<View>) -> Arc<Self> {
        Arc::new(Self {
            mode: view.engine.mode,
            existing: Some(view),
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn created(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// Waits until the host attached a view, then returns its handle and view.
    pub async fn attached(&self) -> (HostHandle, Arc<View>) {
        loop {
            if let Some(entry) = self.created.lock().unwrap().first().cloned() {
                return entry;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl UiShell for Shell {
    fn find_embedded_view(&self) -> Option<Arc<dyn EmbeddedView>> {
        self.existing.clone().map(|v| v as Arc<dyn EmbeddedView>)
    }

    fn create_embedded_view(&self, host: HostHandle) -> Arc<dyn EmbeddedView> {
        let view = Arc::new(View {
            engine: Engine::new(self.mode),
            backs: AtomicUsize::new(0),
            host: Mutex::new(Some(host.clone())),
        });
        self.created.lock().unwrap().push((host, view.clone()));
        view
    }

    fn default_back_pressed(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Relaunch(RestartRequest),
    ForceQuit,
}

/// Relauncher that records calls and returns control to the host.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRelauncher for Recorder {
    fn relaunch(&self, request: RestartRequest) {
        self.calls.lock().unwrap().push(Call::Relaunch(request));
    }

    fn force_quit(&self) {
        self.calls.lock().unwrap().push(Call::ForceQuit);
    }
}

/// Subscriber collecting event kinds in delivery order.
#[derive(Default)]
pub struct Collector {
    kinds: Mutex<Vec<EventKind>>,
}

impl Collector {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.kinds.lock().unwrap().clone()
    }

    pub fn position(&self, kind: EventKind) -> Option<usize> {
        self.kinds().iter().position(|k| *k == kind)
    }
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, event: &Event) {
        self.kinds.lock().unwrap().push(event.kind);
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Test config: no OS signal handling, recognizable component.
pub fn config() -> HostConfig {
    HostConfig {
        component: "app.Main".into(),
        handle_os_signals: false,
        ..HostConfig::default()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
