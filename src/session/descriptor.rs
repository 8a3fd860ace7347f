//! # Launch-boundary types.
//!
//! [`StartupDescriptor`] is the entire contract between the host and the process
//! launcher: a target component, the command-line parameters and the
//! new-launch flag. [`RestartRequest`] pairs a descriptor with an optional opaque
//! payload for the next process.
//!
//! Both serialize with `serde`; field names are part of the relaunch wire format.

use serde::{Deserialize, Serialize};

/// Launch configuration delivered by the OS launcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartupDescriptor {
    /// Target component identifier.
    pub component: String,
    /// Launch-time command-line parameters (`None` = absent).
    #[serde(default)]
    pub command_line_params: Option<Vec<String>>,
    /// Asks a running session to restart through the rebirth protocol.
    #[serde(default)]
    pub new_launch_requested: bool,
}

impl StartupDescriptor {
    /// Creates a descriptor for `component` with no parameters.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            command_line_params: None,
            new_launch_requested: false,
        }
    }

    /// Sets the command-line parameters.
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command_line_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the new-launch flag.
    pub fn with_new_launch(mut self, requested: bool) -> Self {
        self.new_launch_requested = requested;
        self
    }

    /// Parameters as a slice; absent parameters read as empty.
    pub fn params(&self) -> &[String] {
        self.command_line_params.as_deref().unwrap_or_default()
    }
}

/// Transient request consumed by the rebirth coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartRequest {
    /// Opaque payload handed to the next process.
    #[serde(default)]
    pub extra_state: Option<Vec<u8>>,
    /// Descriptor the next process is launched with.
    pub descriptor: StartupDescriptor,
}

impl RestartRequest {
    /// Creates a request without extra state.
    pub fn new(descriptor: StartupDescriptor) -> Self {
        Self {
            extra_state: None,
            descriptor,
        }
    }

    /// Attaches an opaque payload.
    pub fn with_extra_state(mut self, state: Vec<u8>) -> Self {
        self.extra_state = Some(state);
        self
    }
}

/// Identifier returned by "spawn new instance".
///
/// No real handle to the new process is observable from the caller's process,
/// so the value is a fixed sentinel taken from the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Default sentinel.
    pub const SENTINEL: InstanceId = InstanceId(664);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_params_read_as_empty() {
        let d = StartupDescriptor::new("app.Main");
        assert!(d.params().is_empty());
        assert!(d.command_line_params.is_none());
    }

    #[test]
    fn decodes_descriptor_with_missing_optional_fields() {
        let d: StartupDescriptor =
            serde_json::from_str(r#"{"component":"app.Main"}"#).expect("decode");
        assert_eq!(d, StartupDescriptor::new("app.Main"));
    }
}
