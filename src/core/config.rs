//! # Host configuration.
//!
//! Provides [`HostConfig`] centralized settings for the host driver and the session
//! controller.
//!
//! ## Sentinel values
//! - `command_line_file = None` → no bundled file (file contribution is empty)
//! - `bus_capacity = 0` → clamped to 1 by the bus

use std::path::PathBuf;

use crate::session::InstanceId;

/// Request code used when asking for every declared permission at once.
pub const REQUEST_ALL_PERMISSIONS: i32 = 1001;
/// Request code used when asking for a single permission.
pub const REQUEST_SINGLE_PERMISSION: i32 = 1002;

/// Global configuration for the host.
///
/// ## Field semantics
/// - `component`: component identifier put into descriptors built by the host
/// - `command_line_file`: bundled command-line file read once at session start
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `handle_os_signals`: tear the session down on SIGINT/SIGTERM/SIGQUIT (Ctrl-C on Windows)
/// - `instance_id`: identifier returned by "spawn new instance"
/// - `permission_request_codes`: permission results with these codes are logged per permission
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Component identifier for descriptors the host builds itself.
    pub component: String,

    /// Bundled command-line file.
    ///
    /// Read once when the session starts. Missing or corrupt files contribute
    /// no tokens.
    pub command_line_file: Option<PathBuf>,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Whether the host listens for OS termination signals.
    pub handle_os_signals: bool,

    /// Fixed identifier returned by "spawn new instance".
    pub instance_id: InstanceId,

    /// Request codes whose permission results are logged.
    pub permission_request_codes: Vec<i32>,
}

impl HostConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// True if results for `request_code` should be logged per permission.
    #[inline]
    pub fn logs_permission_code(&self, request_code: i32) -> bool {
        self.permission_request_codes.contains(&request_code)
    }
}

impl Default for HostConfig {
    /// Default configuration:
    ///
    /// - `component = "main"`
    /// - `command_line_file = None`
    /// - `bus_capacity = 256`
    /// - `handle_os_signals = true`
    /// - `instance_id = InstanceId::SENTINEL` (664)
    /// - `permission_request_codes = [1001, 1002]`
    fn default() -> Self {
        Self {
            component: "main".to_string(),
            command_line_file: None,
            bus_capacity: 256,
            handle_os_signals: true,
            instance_id: InstanceId::SENTINEL,
            permission_request_codes: vec![REQUEST_ALL_PERMISSIONS, REQUEST_SINGLE_PERMISSION],
        }
    }
}
