//! # Example: process rebirth
//!
//! The toy engine asks for a fresh instance of itself until it reaches the last
//! generation, then force quits. Every generation is a new OS process started by
//! [`CommandRelauncher`]; the generation number travels in the launch params.
//!
//! ```text
//! gen 0 ──spawn_new_instance(["--generation", "1"])──► gen 1 ── ... ──► gen 3 ──force quit
//! ```
//!
//! Run with `RUST_LOG=hostvisor=debug cargo run --example rebirth`.

use std::sync::Arc;
use std::time::Duration;

use hostvisor::{
    ActivityResult, CommandRelauncher, EmbeddedRuntime, EmbeddedView, Host, HostConfig,
    HostHandle, PermissionsResult, RuntimeIdentity, ShutdownSignal, StartupDescriptor, Subscribe,
    UiShell, inherited_request,
};

const LAST_GENERATION: u32 = 3;

struct ToyEngine {
    id: RuntimeIdentity,
}

impl EmbeddedRuntime for ToyEngine {
    fn identity(&self) -> RuntimeIdentity {
        self.id
    }

    fn shutdown_and_release(&self, done: ShutdownSignal) {
        let id = self.id;
        std::thread::spawn(move || {
            println!("[{id}] releasing resources");
            std::thread::sleep(Duration::from_millis(100));
            done.complete();
        });
    }
}

struct ToyView {
    engine: Arc<ToyEngine>,
}

impl EmbeddedView for ToyView {
    fn runtime(&self) -> Arc<dyn EmbeddedRuntime> {
        self.engine.clone()
    }

    fn on_activity_result(&self, result: &ActivityResult) {
        println!("[view] activity result {}", result.request_code);
    }

    fn on_permissions_result(&self, result: &PermissionsResult) {
        println!("[view] permissions result {}", result.request_code);
    }

    fn on_back_pressed(&self) {
        println!("[view] back");
    }

    fn attach(&self, host: HostHandle) {
        println!("[view] attached to {:?}", host.command_line());
    }
}

struct ConsoleShell {
    generation: u32,
}

impl UiShell for ConsoleShell {
    fn find_embedded_view(&self) -> Option<Arc<dyn EmbeddedView>> {
        None
    }

    fn create_embedded_view(&self, host: HostHandle) -> Arc<dyn EmbeddedView> {
        let engine = Arc::new(ToyEngine {
            id: RuntimeIdentity::next(),
        });
        println!(
            "[shell] generation {} started with {:?}",
            self.generation,
            host.command_line()
        );

        let id = engine.id;
        let next = self.generation + 1;
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(300));
            let outcome = if next > LAST_GENERATION {
                host.request_force_quit(id)
            } else {
                host.spawn_new_instance(vec!["--generation".into(), next.to_string()])
                    .map(|instance| println!("[engine] requested instance {instance:?}"))
            };
            if let Err(e) = outcome {
                eprintln!("[engine] host unavailable: {e}");
            }
        });

        Arc::new(ToyView { engine })
    }

    fn default_back_pressed(&self) {
        println!("[shell] back");
    }
}

fn generation_of(descriptor: &StartupDescriptor) -> u32 {
    descriptor
        .params()
        .windows(2)
        .find(|w| w[0] == "--generation")
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(0)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let descriptor = match inherited_request()? {
        Some(request) => request.descriptor,
        None => StartupDescriptor::new("rebirth").with_params(std::env::args().skip(1)),
    };
    let generation = generation_of(&descriptor);

    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(hostvisor::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let cfg = HostConfig {
        component: "rebirth".into(),
        ..HostConfig::default()
    };
    let host = Host::builder(cfg)
        .with_shell(Arc::new(ConsoleShell { generation }))
        .with_relauncher(Arc::new(CommandRelauncher::current()?))
        .with_subscribers(subs)
        .build()?;

    let exit = host.run(descriptor).await?;
    println!("[main] session ended: {exit:?}");
    Ok(())
}
