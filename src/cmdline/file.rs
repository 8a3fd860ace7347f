//! # Bundled command-line file codec.
//!
//! ## Layout (little-endian)
//! ```text
//! ┌──────────┬──────────┬─────────────┬──────────┬─────────────┬───
//! │ argc u32 │ len0 u32 │ len0 bytes  │ len1 u32 │ len1 bytes  │ ...
//! └──────────┴──────────┴─────────────┴──────────┴─────────────┴───
//! ```
//!
//! ## Rules
//! - Input shorter than the 4-byte header decodes to **no tokens** (not an error)
//! - Token payloads are UTF-8; a length above [`MAX_TOKEN_LEN`] is rejected
//! - A truncated length prefix or payload is an error
//! - Bytes after the last declared token are ignored

use std::path::{Path, PathBuf};

use crate::error::CommandLineError;

use super::assembler::CommandLineSource;

/// Largest accepted token, in bytes.
pub const MAX_TOKEN_LEN: usize = 65_535;

const HEADER_LEN: usize = 4;

/// Decodes the bundled command-line format.
///
/// # Example
/// ```
/// let bytes = hostvisor::cmdline::encode(&["--verbose"]);
/// assert_eq!(hostvisor::cmdline::parse(&bytes).unwrap(), vec!["--verbose".to_string()]);
/// ```
pub fn parse(bytes: &[u8]) -> Result<Vec<String>, CommandLineError> {
    if bytes.len() < HEADER_LEN {
        return Ok(Vec::new());
    }
    let argc = read_u32(bytes, 0) as usize;
    let mut pos = HEADER_LEN;
    // argc is untrusted; every token costs at least one header
    let mut tokens = Vec::with_capacity(argc.min(bytes.len() / HEADER_LEN));

    for index in 0..argc {
        let available = bytes.len() - pos;
        if available < HEADER_LEN {
            return Err(CommandLineError::Truncated {
                index,
                needed: HEADER_LEN,
                available,
            });
        }
        let len = read_u32(bytes, pos) as usize;
        pos += HEADER_LEN;

        if len > MAX_TOKEN_LEN {
            return Err(CommandLineError::TokenTooLong {
                index,
                len,
                max: MAX_TOKEN_LEN,
            });
        }
        let available = bytes.len() - pos;
        if available < len {
            return Err(CommandLineError::Truncated {
                index,
                needed: len,
                available,
            });
        }

        let token = std::str::from_utf8(&bytes[pos..pos + len])
            .map_err(|_| CommandLineError::InvalidUtf8 { index })?;
        tokens.push(token.to_owned());
        pos += len;
    }
    Ok(tokens)
}

/// Encodes tokens into the bundled command-line format.
pub fn encode<S: AsRef<str>>(tokens: &[S]) -> Vec<u8> {
    let payload: usize = tokens.iter().map(|t| HEADER_LEN + t.as_ref().len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + payload);
    out.extend_from_slice(&(tokens.len() as u32).to_le_bytes());
    for token in tokens {
        let token = token.as_ref().as_bytes();
        out.extend_from_slice(&(token.len() as u32).to_le_bytes());
        out.extend_from_slice(token);
    }
    out
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; HEADER_LEN];
    word.copy_from_slice(&bytes[at..at + HEADER_LEN]);
    u32::from_le_bytes(word)
}

/// Reads the command line from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommandLineSource for FileSource {
    fn read_tokens(&self) -> Result<Vec<String>, CommandLineError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CommandLineError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse(&bytes)
    }
}
