//! # Command-line assembly.
//!
//! The session command line is built once at startup from two sources, in this order:
//!
//! ```text
//!   bundled file (_cl_) ──► parse ──┐  (any failure → empty)
//!                                   ├──► CommandLine = file tokens ++ launch params
//!   StartupDescriptor params ───────┘  (absent → empty)
//! ```
//!
//! - [`file`]: binary codec of the bundled file and [`FileSource`]
//! - [`assembler`]: [`CommandLineSource`] seam and [`assemble`]

mod assembler;
mod file;

use std::ops::Deref;
use std::sync::Arc;

pub use assembler::{Assembly, CommandLineSource, NoSource, StaticSource, assemble};
pub use file::{FileSource, MAX_TOKEN_LEN, encode, parse};

/// Immutable, cheaply cloneable sequence of command-line tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine(Arc<[String]>);

impl CommandLine {
    /// Tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Shared handle to the tokens (for event payloads).
    pub fn shared(&self) -> Arc<[String]> {
        Arc::clone(&self.0)
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self(Arc::from(Vec::<String>::new()))
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(tokens: Vec<String>) -> Self {
        Self(Arc::from(tokens))
    }
}

impl Deref for CommandLine {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}
