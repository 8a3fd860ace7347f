//! Error types used by the hostvisor runtime.
//!
//! This module defines two enums:
//!
//! - [`HostError`]: errors raised by the host driver and its handle.
//! - [`CommandLineError`]: errors raised while reading the bundled command-line file.
//!
//! Command-line errors never reach the caller of session startup: the assembler
//! turns them into an empty contribution. They exist so the fallback can be logged.

use std::path::PathBuf;

use thiserror::Error;

/// # Errors produced by the host driver.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HostError {
    /// The session was already started; the command line is computed exactly once.
    #[error("session already started")]
    AlreadyStarted,

    /// The control task is gone; commands can no longer be delivered.
    #[error("host control channel closed")]
    Closed,

    /// A required collaborator was not supplied to the builder.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Restart request could not be encoded for (or decoded from) a relaunch.
    #[error("restart request codec: {0}")]
    Codec(#[from] serde_json::Error),

    /// Spawning the replacement process failed.
    #[error("relaunch failed: {0}")]
    Relaunch(#[from] std::io::Error),
}

impl HostError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hostvisor::HostError;
    ///
    /// assert_eq!(HostError::AlreadyStarted.as_label(), "host_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HostError::AlreadyStarted => "host_already_started",
            HostError::Closed => "host_closed",
            HostError::MissingCollaborator(_) => "host_missing_collaborator",
            HostError::Codec(_) => "host_codec",
            HostError::Relaunch(_) => "host_relaunch",
        }
    }
}

/// # Errors produced while reading the bundled command-line file.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandLineError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file ended before a length prefix or token payload was complete.
    #[error("truncated at token {index}: need {needed} bytes, {available} left")]
    Truncated {
        /// Zero-based token index being decoded.
        index: usize,
        /// Bytes required to continue.
        needed: usize,
        /// Bytes remaining in the input.
        available: usize,
    },

    /// A token declared a length above the accepted maximum.
    #[error("token {index} is {len} bytes; limit is {max}")]
    TokenTooLong {
        /// Zero-based token index.
        index: usize,
        /// Declared length.
        len: usize,
        /// Accepted maximum.
        max: usize,
    },

    /// A token was not valid UTF-8.
    #[error("token {index} is not valid utf-8")]
    InvalidUtf8 {
        /// Zero-based token index.
        index: usize,
    },
}

impl CommandLineError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CommandLineError::Io { .. } => "cmdline_io",
            CommandLineError::Truncated { .. } => "cmdline_truncated",
            CommandLineError::TokenTooLong { .. } => "cmdline_token_too_long",
            CommandLineError::InvalidUtf8 { .. } => "cmdline_invalid_utf8",
        }
    }

    /// Indicates whether the file was present but malformed.
    ///
    /// Returns `false` for I/O failures (missing or unreadable file).
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, CommandLineError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(HostError::Closed.as_label(), "host_closed");
        assert_eq!(
            HostError::MissingCollaborator("shell").as_label(),
            "host_missing_collaborator"
        );
        let err = CommandLineError::InvalidUtf8 { index: 2 };
        assert_eq!(err.as_label(), "cmdline_invalid_utf8");
        assert!(err.is_corrupt());
    }

    #[test]
    fn io_errors_are_not_corruption() {
        let err = CommandLineError::Io {
            path: PathBuf::from("_cl_"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_corrupt());
        assert!(err.to_string().contains("_cl_"));
    }
}
