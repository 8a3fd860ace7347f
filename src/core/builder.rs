use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cmdline::{CommandLineSource, FileSource, NoSource};
use crate::contract::{ProcessRelauncher, UiShell};
use crate::error::HostError;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

use super::{Host, HostConfig, HostSessionController};

/// Builder for constructing a [`Host`] from its collaborators.
pub struct HostBuilder {
    cfg: HostConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    shell: Option<Arc<dyn UiShell>>,
    relauncher: Option<Arc<dyn ProcessRelauncher>>,
    source: Option<Arc<dyn CommandLineSource>>,
}

impl HostBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: HostConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            shell: None,
            relauncher: None,
            source: None,
        }
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive lifecycle events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the UI shell hosting the embedded view. Required.
    pub fn with_shell(mut self, shell: Arc<dyn UiShell>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Sets the process relauncher. Required.
    pub fn with_relauncher(mut self, relauncher: Arc<dyn ProcessRelauncher>) -> Self {
        self.relauncher = Some(relauncher);
        self
    }

    /// Overrides where the bundled command line comes from.
    ///
    /// Defaults to a [`FileSource`] on [`HostConfig::command_line_file`], or no
    /// bundled tokens when that is unset.
    pub fn with_command_line_source(mut self, source: Arc<dyn CommandLineSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Builds the host.
    ///
    /// Must be called inside a Tokio runtime: subscriber workers start immediately.
    pub fn build(self) -> Result<Host, HostError> {
        let shell = self.shell.ok_or(HostError::MissingCollaborator("shell"))?;
        let relauncher = self
            .relauncher
            .ok_or(HostError::MissingCollaborator("relauncher"))?;
        let source: Arc<dyn CommandLineSource> = match (self.source, &self.cfg.command_line_file) {
            (Some(source), _) => source,
            (None, Some(path)) => Arc::new(FileSource::new(path.clone())),
            (None, None) => Arc::new(NoSource),
        };

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let (tx, rx) = mpsc::unbounded_channel();

        let controller = HostSessionController::new(
            self.cfg.clone(),
            shell,
            relauncher,
            source,
            tx.clone(),
            bus.clone(),
        );
        Ok(Host::new_internal(self.cfg, bus, subs, controller, tx, rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fakes::{FakeRelauncher, FakeShell};

    #[tokio::test]
    async fn shell_and_relauncher_are_required() {
        let err = HostBuilder::new(HostConfig::default())
            .with_relauncher(Arc::new(FakeRelauncher::default()))
            .build()
            .err()
            .expect("missing shell");
        assert!(matches!(err, HostError::MissingCollaborator("shell")));

        let err = HostBuilder::new(HostConfig::default())
            .with_shell(FakeShell::new())
            .build()
            .err()
            .expect("missing relauncher");
        assert!(matches!(err, HostError::MissingCollaborator("relauncher")));
    }

    #[tokio::test]
    async fn builds_with_required_collaborators() {
        let host = HostBuilder::new(HostConfig::default())
            .with_shell(FakeShell::new())
            .with_relauncher(Arc::new(FakeRelauncher::default()))
            .build()
            .expect("build");
        assert_eq!(host.handle().command_line(), None);
        assert!(!host.cancel_token().is_cancelled());
    }
}
