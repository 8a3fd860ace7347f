//! # Command-line assembler.
//!
//! [`assemble`] concatenates the bundled-file tokens and the launch parameters.
//! It never fails: a source error turns the file contribution into the empty
//! sequence and is handed back in [`Assembly::file_error`] for logging.

use crate::error::CommandLineError;

use super::CommandLine;

/// Provider of the bundled command-line tokens.
pub trait CommandLineSource: Send + Sync + 'static {
    /// Reads and parses the tokens.
    fn read_tokens(&self) -> Result<Vec<String>, CommandLineError>;
}

/// Source with no bundled file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl CommandLineSource for NoSource {
    fn read_tokens(&self) -> Result<Vec<String>, CommandLineError> {
        Ok(Vec::new())
    }
}

/// Source returning a fixed token list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<String>);

impl CommandLineSource for StaticSource {
    fn read_tokens(&self) -> Result<Vec<String>, CommandLineError> {
        Ok(self.0.clone())
    }
}

/// Result of a command-line assembly.
#[derive(Debug)]
pub struct Assembly {
    /// File tokens followed by launch parameters.
    pub command_line: CommandLine,
    /// Why the file contributed nothing, if it failed.
    pub file_error: Option<CommandLineError>,
}

/// Builds the session command line: file tokens first, then `launch_params`.
///
/// # Example
/// ```
/// use hostvisor::cmdline::{StaticSource, assemble};
///
/// let file = StaticSource(vec!["--verbose".into()]);
/// let launch = vec!["--level".to_string(), "3".to_string()];
/// let out = assemble(&file, Some(launch.as_slice()));
/// assert_eq!(out.command_line.as_slice(), ["--verbose", "--level", "3"]);
/// ```
pub fn assemble(source: &dyn CommandLineSource, launch_params: Option<&[String]>) -> Assembly {
    let (mut tokens, file_error) = match source.read_tokens() {
        Ok(tokens) => (tokens, None),
        Err(e) => (Vec::new(), Some(e)),
    };
    tokens.extend(launch_params.unwrap_or_default().iter().cloned());

    Assembly {
        command_line: CommandLine::from(tokens),
        file_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdline::{FileSource, encode};

    struct Corrupt;

    impl CommandLineSource for Corrupt {
        fn read_tokens(&self) -> Result<Vec<String>, CommandLineError> {
            Err(CommandLineError::InvalidUtf8 { index: 0 })
        }
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn file_tokens_precede_launch_params() {
        let file = StaticSource(strings(&["--verbose"]));
        let launch = strings(&["--level", "3"]);

        let out = assemble(&file, Some(launch.as_slice()));

        assert_eq!(out.command_line.as_slice(), ["--verbose", "--level", "3"]);
        assert!(out.file_error.is_none());
    }

    #[test]
    fn absent_and_empty_launch_params_are_equivalent() {
        let file = StaticSource(strings(&["-a", "-a"]));
        let absent = assemble(&file, None);
        let empty = assemble(&file, Some(&[][..]));

        assert_eq!(absent.command_line, empty.command_line);
        assert_eq!(absent.command_line.as_slice(), ["-a", "-a"]);
    }

    #[test]
    fn corrupt_source_behaves_like_empty_source() {
        let launch = strings(&["--debug"]);

        let corrupt = assemble(&Corrupt, Some(launch.as_slice()));
        let empty = assemble(&NoSource, Some(launch.as_slice()));

        assert_eq!(corrupt.command_line, empty.command_line);
        assert!(corrupt.file_error.is_some_and(|e| e.is_corrupt()));
        assert!(empty.file_error.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_launch_params() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = FileSource::new(dir.path().join("_cl_"));
        let launch = strings(&["--x"]);

        let out = assemble(&source, Some(launch.as_slice()));

        assert_eq!(out.command_line.as_slice(), ["--x"]);
        assert!(out.file_error.is_some());
    }

    #[test]
    fn truncated_file_contributes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("_cl_");
        let mut bytes = encode(&["--verbose", "--fast"]);
        bytes.pop();
        std::fs::write(&path, bytes).expect("write");

        let out = assemble(&FileSource::new(&path), None);

        assert!(out.command_line.is_empty());
        assert!(out.file_error.is_some());
    }
}
