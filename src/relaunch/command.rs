//! # CommandRelauncher: whole-process replacement through `std::process::Command`.
//!
//! ```text
//! relaunch(request)
//!   ├─► program  = configured executable (default: current_exe)
//!   ├─► argv     = request.descriptor.params()
//!   ├─► env      = HOSTVISOR_RESTART_REQUEST=<json(request)>
//!   ├─► spawn()  (failure is logged; the process still exits)
//!   └─► std::process::exit(exit_code)
//!
//! force_quit()  ─► std::process::exit(exit_code)
//! ```
//!
//! The replacement process calls [`inherited_request`] to recover the request,
//! including `extra_state`, and starts its own session from the descriptor.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::contract::ProcessRelauncher;
use crate::error::HostError;
use crate::session::RestartRequest;

/// Environment variable carrying the JSON-encoded [`RestartRequest`].
pub const RESTART_REQUEST_ENV: &str = "HOSTVISOR_RESTART_REQUEST";

/// Relauncher that re-executes a program and then exits.
#[derive(Debug, Clone)]
pub struct CommandRelauncher {
    program: PathBuf,
    exit_code: i32,
}

impl CommandRelauncher {
    /// Relauncher for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            exit_code: 0,
        }
    }

    /// Relauncher for the currently running executable.
    pub fn current() -> Result<Self, HostError> {
        Ok(Self::new(std::env::current_exe()?))
    }

    /// Exit status used when leaving the current process.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Program that gets re-executed.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command that starts the replacement process for `request`.
    pub fn command(&self, request: &RestartRequest) -> Result<Command, HostError> {
        let encoded = serde_json::to_string(request)?;
        let mut cmd = Command::new(&self.program);
        cmd.args(request.descriptor.params())
            .env(RESTART_REQUEST_ENV, encoded);
        Ok(cmd)
    }

    fn spawn(&self, request: &RestartRequest) -> Result<u32, HostError> {
        let child = self.command(request)?.spawn()?;
        Ok(child.id())
    }
}

impl ProcessRelauncher for CommandRelauncher {
    fn relaunch(&self, request: RestartRequest) {
        match self.spawn(&request) {
            Ok(pid) => {
                tracing::info!(
                    pid,
                    program = %self.program.display(),
                    "replacement process started"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    label = e.as_label(),
                    "relaunch failed; exiting anyway"
                );
            }
        }
        std::process::exit(self.exit_code)
    }

    fn force_quit(&self) {
        tracing::info!(code = self.exit_code, "force quitting process");
        std::process::exit(self.exit_code)
    }
}

/// Decodes a restart request produced by [`CommandRelauncher`].
pub fn decode(encoded: &str) -> Result<RestartRequest, HostError> {
    Ok(serde_json::from_str(encoded)?)
}

/// Restart request handed down by the process that relaunched this one.
///
/// `Ok(None)` for a first launch.
pub fn inherited_request() -> Result<Option<RestartRequest>, HostError> {
    match std::env::var_os(RESTART_REQUEST_ENV) {
        None => Ok(None),
        Some(raw) => decode_os(&raw).map(Some),
    }
}

fn decode_os(raw: &OsStr) -> Result<RestartRequest, HostError> {
    let encoded = raw.to_str().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{RESTART_REQUEST_ENV} is not valid unicode"),
        )
    })?;
    decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StartupDescriptor;

    fn request() -> RestartRequest {
        RestartRequest::new(StartupDescriptor::new("app.Main").with_params(["--scene", "b"]))
            .with_extra_state(vec![9, 8, 7])
    }

    #[test]
    fn command_carries_args_and_encoded_request() {
        let relauncher = CommandRelauncher::new("/opt/app/bin/game");
        let cmd = relauncher.command(&request()).expect("command");

        assert_eq!(cmd.get_program(), "/opt/app/bin/game");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["--scene", "b"]);

        let (_, value) = cmd
            .get_envs()
            .find(|(k, _)| *k == RESTART_REQUEST_ENV)
            .expect("restart env var");
        let decoded = decode_os(value.expect("value set")).expect("decode");
        assert_eq!(decoded, request());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode("not json").unwrap_err();
        assert!(matches!(err, HostError::Codec(_)));
        assert_eq!(err.as_label(), "host_codec");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let decoded = decode(r#"{"descriptor":{"component":"app.Main"}}"#).expect("decode");
        assert_eq!(decoded, RestartRequest::new(StartupDescriptor::new("app.Main")));
    }
}
